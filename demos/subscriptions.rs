//! # Example: subscriptions
//!
//! Handles returned by registration:
//! - [`Subscription`]: remove or query one entry, from anywhere.
//! - [`ScopedSubscription`]: entry lives as long as the guard.
//! - `forward`: re-emit one emitter's event on another.
//!
//! ## Run
//! ```bash
//! cargo run --example subscriptions
//! ```

use reemit::{EmitError, Emitter, ListenerError, ScopedSubscription, Subscription};

fn main() -> Result<(), EmitError> {
    let sensors: Emitter<f64> = Emitter::new();
    let alerts: Emitter<f64> = Emitter::new();

    let printer: Subscription<f64> = sensors.on("temp", |t| {
        println!("[printer] temp={t:.1}");
        Ok(())
    });

    {
        let _guard: ScopedSubscription<f64> = sensors
            .on("temp", |t| {
                println!("[scoped] temp={t:.1}");
                Ok(())
            })
            .scoped();
        sensors.emit("temp", &20.5)?;
    }
    println!("scoped guard dropped: {} listener(s)", sensors.listener_count("temp"));

    sensors.forward("temp", &alerts, "reading");
    alerts.on("reading", |t| {
        if *t > 90.0 {
            return Err(ListenerError::fail(format!("overheat: {t:.1}")));
        }
        println!("[alerts] reading={t:.1} ok");
        Ok(())
    });

    sensors.emit("temp", &42.0)?;

    if let Err(err) = sensors.emit("temp", &95.0) {
        println!("[{}] {}", err.as_label(), err);
        println!("origin: {}", err.origin());
    }

    printer.disconnect();
    println!("printer connected: {}", printer.is_connected());
    sensors.emit("temp", &21.0)?;
    Ok(())
}
