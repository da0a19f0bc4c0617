//! Source device for the Sony DualShock 4 over hidraw
use std::error::Error;
use std::ffi::CString;

use hidapi::HidDevice;
use tokio::sync::mpsc;

use crate::drivers::dualshock::driver::Driver;
use crate::drivers::dualshock::event::Event;

/// Vendor ID
pub const VID: u16 = 0x054c;
/// Product IDs of the first and second generation controllers
pub const PIDS: [u16; 2] = [0x05c4, 0x09cc];

/// Size of the USB input report. Bluetooth reports are longer, but every
/// field we decode sits in the leading bytes, so a truncated read loses
/// nothing.
const PACKET_SIZE: usize = 64;

/// Sony DualShock 4 source device. Owns the hidraw handle and the decoding
/// engine and forwards decoded events to the event channel.
pub struct DualShockController {
    device: HidDevice,
    driver: Driver,
    tx: mpsc::Sender<Event>,
}

impl DualShockController {
    /// Open the device at the given hidraw path and verify its identity
    pub fn new(
        path: String,
        tx: mpsc::Sender<Event>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let c_path = CString::new(path.clone())?;
        let api = hidapi::HidApi::new()?;
        let device = api.open_path(&c_path)?;
        let info = device.get_device_info()?;
        let vid = info.vendor_id();
        let pid = info.product_id();
        if vid != VID || !PIDS.contains(&pid) {
            return Err(
                format!("Device '{path}' is not a DualShock 4 controller: {vid:04x}:{pid:04x}")
                    .into(),
            );
        }

        Ok(Self {
            device,
            driver: Driver::new(),
            tx,
        })
    }

    /// Read frames from the device and send decoded events until the device
    /// or the channel goes away. hidapi reads block, so the loop runs on a
    /// blocking task.
    pub async fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        log::debug!("Starting DualShock 4 read loop");
        let Self {
            device,
            mut driver,
            tx,
        } = self;

        let task =
            tokio::task::spawn_blocking(move || -> Result<(), Box<dyn Error + Send + Sync>> {
                loop {
                    let mut buf = [0; PACKET_SIZE];
                    let bytes_read = device.read(&mut buf[..])?;

                    let events = match driver.handle_frame(&buf[..bytes_read]) {
                        Ok(events) => events,
                        Err(err) => {
                            // Recoverable: drop the frame, keep the stream alive
                            log::warn!("Dropping frame: {err}");
                            continue;
                        }
                    };
                    for event in events {
                        tx.blocking_send(event)?;
                    }
                }
            });

        task.await?
    }
}
