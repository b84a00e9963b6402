#![no_std]
#![no_main]

use defmt::{debug, error, info, warn};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::Pio;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use sidewinder_rp2040::{
    feed_byte, period, BridgeError, Decoder, FrameNotifier, PioLines, SampleBridge, SampleSlot,
    SnapshotSource, SourceError, UartLogSink, DEFAULT_TIMING, SERIAL_BAUD,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

type JoystickDecoder =
    Decoder<'static, PioLines<'static>, CriticalSectionRawMutex, FrameNotifier>;

/// Last completed frame; written by the decoder, read by the logger.
static SLOT: SampleSlot<CriticalSectionRawMutex> = SampleSlot::new();

/// Wakes the logger when a frame is published.
/// Latest value wins: a slow logger skips frames instead of queueing them.
static FRAME_READY: StaticCell<Signal<CriticalSectionRawMutex, ()>> = StaticCell::new();

/// Runs the decoder above thread mode so edges are never delayed by logging.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SideWinder decoder starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let ready = FRAME_READY.init(Signal::new());

    // --- Gameport Setup ---
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);

    let trigger = Output::new(p.PIN_2, Level::High);
    let data = common.make_pio_pin(p.PIN_3);
    let clock = common.make_pio_pin(p.PIN_4);
    let recv_indicator = Output::new(p.PIN_6, Level::Low);
    let clock_indicator = Output::new(p.PIN_7, Level::Low);
    let fire_led = Output::new(p.PIN_25, Level::High);

    let lines = PioLines::new(
        &mut common,
        sm0,
        data,
        clock,
        trigger,
        recv_indicator,
        clock_indicator,
    );
    let decoder = Decoder::new(lines, &SLOT, DEFAULT_TIMING)
        .with_observer(FrameNotifier::new(ready, fire_led));

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = SERIAL_BAUD;

    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX (unused)
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, _rx) = uart.split();
    let bridge = SampleBridge::new(SnapshotSource::new(&SLOT, ready), UartLogSink::new(tx));

    // Decoder gets its own executor on a software interrupt
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    high_spawner.spawn(decoder_task(decoder).unwrap());
    spawner.spawn(logger_task(bridge).unwrap());

    info!(
        "SideWinder decoder initialized, polling every {} us",
        DEFAULT_TIMING.cycle_micros()
    );
}

/// Decoder task - phase timer and captured clock edges for the gameport.
///
/// Deadlines advance from the previous deadline, not from "now", so the
/// polling cycle does not drift with task latency. Bytes still in the
/// capture FIFO when a deadline fires are handed over before the phase
/// switches.
#[embassy_executor::task]
async fn decoder_task(mut decoder: JoystickDecoder) {
    let mut deadline = Instant::now() + period(decoder.config(), decoder.next_period_ticks());

    loop {
        let timer_fired = if decoder.edges_armed() {
            match select(Timer::at(deadline), decoder.lines_mut().next_byte()).await {
                Either::First(()) => true,
                Either::Second(byte) => {
                    feed_byte(&mut decoder, byte);
                    false
                }
            }
        } else {
            Timer::at(deadline).await;
            true
        };

        if timer_fired {
            while let Some(byte) = decoder.lines_mut().try_next_byte() {
                feed_byte(&mut decoder, byte);
            }
            let ticks = decoder.on_timer_tick();
            deadline += period(decoder.config(), ticks);
        }
    }
}

/// Logger task - writes each published sample to the serial line.
#[embassy_executor::task]
async fn logger_task(mut bridge: SampleBridge<SnapshotSource, UartLogSink<'static>>) {
    if let Err(e) = bridge.output_mut().write_banner().await {
        error!("Banner write failed: {:?}", e);
    }
    info!("Serial logger ready");

    loop {
        match bridge.process_one().await {
            Ok(()) => debug!("Logged frame #{}", bridge.forwarded()),
            Err(BridgeError::Source(SourceError::Stale)) => {
                warn!("Sample went stale before it was logged");
            }
            Err(e) => error!("Logger error: {:?}", e),
        }
    }
}
