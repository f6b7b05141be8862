use std::fs;
use std::path::Path;

/// First fan tachometer reading (RPM) found under `/sys/class/hwmon`.
///
/// `None` means no fan sensor is exposed. That is normal on desktops,
/// VMs and many laptops, not an error.
pub fn read_fan_rpm() -> Option<f32> {
    read_fan_rpm_in(Path::new("/sys/class/hwmon"))
}

fn read_fan_rpm_in(hwmon_root: &Path) -> Option<f32> {
    let devices = fs::read_dir(hwmon_root).ok()?;
    for device in devices.flatten() {
        let Ok(inputs) = fs::read_dir(device.path()) else {
            continue;
        };
        for input in inputs.flatten() {
            let name = input.file_name();
            let Some(name) = name.to_str() else { continue };
            if !(name.starts_with("fan") && name.ends_with("_input")) {
                continue;
            }
            if let Some(rpm) = read_sensor_value(&input.path()) {
                return Some(rpm);
            }
        }
    }
    None
}

/// CPU temperature in degrees Celsius from the first readable thermal
/// zone, or `None` when the platform exposes none.
pub fn read_cpu_temperature() -> Option<f32> {
    read_cpu_temperature_in(Path::new("/sys/class/thermal"))
}

fn read_cpu_temperature_in(thermal_root: &Path) -> Option<f32> {
    let zones = fs::read_dir(thermal_root).ok()?;
    let mut paths: Vec<_> = zones
        .flatten()
        .map(|z| z.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("thermal_zone"))
        })
        .collect();
    paths.sort();

    for zone in paths {
        // Zone files report millidegrees.
        if let Some(milli) = read_sensor_value(&zone.join("temp")) {
            return Some(milli / 1000.0);
        }
    }
    None
}

fn read_sensor_value(path: &Path) -> Option<f32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}
