//! Host appearance detection.
//!
//! Resolves the `SystemDefault` theme mode to a concrete colour mode. Every
//! check is best-effort; a host we cannot query is treated as light.

use tracing::debug;

/// Returns `true` when the desktop advertises a dark appearance.
pub fn detect_system_dark_mode() -> bool {
    match query_dark_preference() {
        Some(dark) => {
            debug!(dark, "system appearance detected");
            dark
        }
        None => {
            debug!("system appearance unknown, assuming light");
            false
        }
    }
}

#[cfg(target_os = "windows")]
fn query_dark_preference() -> Option<bool> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let personalize = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .ok()?;
    // AppsUseLightTheme: 0 = dark, 1 = light
    let value = personalize.get_value::<u32, _>("AppsUseLightTheme").ok()?;
    Some(value == 0)
}

#[cfg(target_os = "linux")]
fn query_dark_preference() -> Option<bool> {
    let scheme = gsettings_interface_key("color-scheme");
    if let Some(scheme) = &scheme {
        if scheme.contains("prefer-dark") {
            return Some(true);
        }
        if scheme.contains("prefer-light") {
            return Some(false);
        }
    }

    let gtk_theme = gsettings_interface_key("gtk-theme");
    match (scheme, gtk_theme) {
        (_, Some(theme)) => Some(theme.to_lowercase().contains("dark")),
        (Some(_), None) => Some(false),
        (None, None) => None,
    }
}

#[cfg(target_os = "linux")]
fn gsettings_interface_key(key: &str) -> Option<String> {
    use std::process::Command;

    let output = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(target_os = "macos")]
fn query_dark_preference() -> Option<bool> {
    use std::process::Command;

    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    // The key is absent (non-zero exit) while the light appearance is active.
    if !output.status.success() {
        return Some(false);
    }
    Some(String::from_utf8_lossy(&output.stdout).to_lowercase().contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn query_dark_preference() -> Option<bool> {
    None
}
