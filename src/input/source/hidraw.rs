pub mod dualshock;

use std::error::Error;

use hidapi::DeviceInfo;

/// Returns an array of all HIDRaw devices
pub fn list_devices() -> Result<Vec<DeviceInfo>, Box<dyn Error + Send + Sync>> {
    let api = hidapi::HidApi::new()?;
    let devices: Vec<DeviceInfo> = api.device_list().cloned().collect();

    Ok(devices)
}

/// Returns the hidraw path of the first connected DualShock 4, if any
pub fn discover() -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
    let devices = list_devices()?;
    let found = devices.iter().find(|info| {
        info.vendor_id() == dualshock::VID && dualshock::PIDS.contains(&info.product_id())
    });

    Ok(found.map(|info| info.path().to_string_lossy().to_string()))
}
