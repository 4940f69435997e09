//! Web-controlled DC motor firmware
//!
//! - Drives both motor driver inputs low and starts PWM at 0% duty
//! - Connects to the configured `WiFi` network as a station
//! - Serves the control page on port 80 and applies `/set?valor=<speed>`

#![no_std]
#![no_main]

// static_cell::make_static! in main causes a compiler error
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

mod infrastructure;

use embassy_executor::Spawner;
use embassy_time::Duration;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_println::println;
use log::info;

use dcmotor_core::RequestDispatcher;
use dcmotor_page::CONTROL_PAGE_HTML;

use crate::infrastructure::config;
use crate::infrastructure::drivers::{init_motor, init_network_stack, wait_for_connection};
use crate::infrastructure::tasks::{http_server_task, network_runner_task, wifi_connection_task};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  {} {}", config::DEVICE.name, config::FIRMWARE.version);
    println!("=================================");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // The motor comes first so the driver inputs never float while WiFi associates
    let motor = init_motor(
        peripherals.LEDC,
        crate::motor_gpio_a!(peripherals),
        crate::motor_gpio_b!(peripherals),
    )
    .await;

    // Initialize network stack and spawn network tasks
    let (stack, runner, controller) = init_network_stack(peripherals.WIFI);
    spawner
        .spawn(wifi_connection_task(controller))
        .expect("Failed to spawn WiFi connection task");
    spawner
        .spawn(network_runner_task(runner))
        .expect("Failed to spawn network runner task");

    let ip = wait_for_connection(stack).await;
    info!(
        "network: connected, address: {}, gateway: {:?}",
        ip.address, ip.gateway
    );

    let dispatcher = RequestDispatcher::new(motor, CONTROL_PAGE_HTML);
    spawner
        .spawn(http_server_task(stack, dispatcher))
        .expect("Failed to spawn HTTP server task");

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
