use anyhow::{bail, Result};
use tokio::time::{sleep, Duration};

use pulseboard::controller::{Controller, Mode};
use pulseboard::generator::LiveGenerator;
use pulseboard::logging::{json_log, obj, v_num, v_str};
use pulseboard::sink::ConsoleSink;
use pulseboard::state::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log(
        "startup",
        obj(&[
            ("tick_ms", v_num(cfg.tick_ms as f64)),
            ("window", v_num(cfg.window as f64)),
            ("data_path", v_str(cfg.data_path.as_deref().unwrap_or("-"))),
        ]),
    );

    let mut controller = Controller::new(&cfg, LiveGenerator::new(), ConsoleSink);

    // With a data file we behave like the upload path: read to completion,
    // hand the outcome to the controller, and show the result.
    if let Some(path) = cfg.data_path.clone() {
        controller.on_read_started();
        let outcome = tokio::fs::read_to_string(&path).await.map_err(|e| e.to_string());
        controller.on_read_complete(outcome);
        json_log("status", obj(&[("text", v_str(controller.status()))]));
        if controller.mode() == Mode::UploadedStatic {
            // Static display: nothing left to drive.
            return Ok(());
        }
        bail!("{}", controller.status());
    }

    // No file: skip straight to the live demo and drive the tick loop.
    controller.on_skip();
    json_log("status", obj(&[("text", v_str(controller.status()))]));
    while controller.armed() {
        sleep(Duration::from_millis(cfg.tick_ms)).await;
        controller.on_tick();
    }
    Ok(())
}
