pub(crate) struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub(crate) struct DeviceConfig {
    pub name: &'static str,
    pub hostname: &'static str,
}

pub(crate) struct MotorConfig {
    /// Swap the inputs used for forward and reverse
    pub invert: bool,
    pub pwm_frequency_hz: u32,
    /// Time the driver inputs are held low before PWM takes over
    pub settle_ms: u64,
}

pub(crate) struct HttpConfig {
    pub port: u16,
}

pub(crate) struct FirmwareConfig {
    pub version: &'static str,
}

pub(crate) const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    name: "DC Motor",
    hostname: "dcmotor",
};

pub(crate) const MOTOR: MotorConfig = MotorConfig {
    invert: cfg!(feature = "invert"),
    pwm_frequency_hz: 1000,
    settle_ms: 50,
};

pub(crate) const HTTP: HttpConfig = HttpConfig { port: 80 };

pub(crate) const FIRMWARE: FirmwareConfig = FirmwareConfig {
    version: env!("BUILD_VERSION"),
};

/// Driver input A-1A (forward)
#[macro_export]
macro_rules! motor_gpio_a {
    ($p:expr) => {
        $p.GPIO4
    };
}

/// Driver input A-1B (reverse)
#[macro_export]
macro_rules! motor_gpio_b {
    ($p:expr) => {
        $p.GPIO5
    };
}
