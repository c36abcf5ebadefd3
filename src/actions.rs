// Host actions.
// Builds the URLs for files and pages and hands them to the platform opener
// or clipboard.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{FigmaError, Result};
use crate::figma::{File, Node};

const WEB_BASE: &str = "https://figma.com/file";
const DESKTOP_BASE: &str = "figma://file";

/// Browser URL of a file; also the link copied to the clipboard.
pub fn web_url(file: &File) -> String {
    format!("{}/{}", WEB_BASE, file.key)
}

/// Desktop app URL of a file.
pub fn desktop_url(file: &File) -> String {
    format!("{}/{}", DESKTOP_BASE, file.key)
}

/// Desktop app URL of a page within a file.
pub fn page_url(file: &File, page: &Node) -> String {
    format!("{}/{}?node-id={}", DESKTOP_BASE, file.key, page.id)
}

/// Action requested by the user, executed by [`perform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a URL with the default handler (browser for https).
    OpenUrl(String),
    /// Open a URL in the Figma desktop app.
    OpenNative(String),
    /// Put text on the clipboard.
    CopyText(String),
    /// Remove every cached snapshot.
    ClearCache,
}

impl Action {
    /// Open a file in the desktop app when available, otherwise in the browser.
    pub fn open_file(file: &File, desktop_app: bool) -> Self {
        if desktop_app {
            Action::OpenNative(desktop_url(file))
        } else {
            Action::OpenUrl(web_url(file))
        }
    }

    /// Pages only open in the desktop app.
    pub fn open_page(file: &File, page: &Node) -> Self {
        Action::OpenNative(page_url(file, page))
    }

    pub fn copy_link(file: &File) -> Self {
        Action::CopyText(web_url(file))
    }

    /// Status line text after the action succeeded.
    pub fn done_message(&self) -> &'static str {
        match self {
            Action::OpenUrl(_) => "Opened in browser",
            Action::OpenNative(_) => "Opened in Figma",
            Action::CopyText(_) => "Copied link to clipboard",
            Action::ClearCache => "Cleared cache",
        }
    }
}

/// Execute an opener or clipboard action. `ClearCache` is handled by the app.
pub fn perform(action: &Action) -> Result<()> {
    match action {
        Action::OpenUrl(url) | Action::OpenNative(url) => {
            info!(%url, "opening");
            open_url(url)
        }
        Action::CopyText(text) => {
            info!(%text, "copying to clipboard");
            copy_to_clipboard(text)
        }
        Action::ClearCache => Err(FigmaError::Other(
            "clear cache is not an opener action".to_string(),
        )),
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

fn open_url(url: &str) -> Result<()> {
    let status = opener_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(FigmaError::Other(format!("Could not open {} ({})", url, status)))
    }
}

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

/// Clipboard tools to try, in order.
fn clipboard_commands() -> Vec<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        vec![("pbcopy", NO_ARGS)]
    } else if cfg!(target_os = "windows") {
        vec![("clip", NO_ARGS)]
    } else {
        vec![
            ("wl-copy", NO_ARGS),
            ("xclip", XCLIP_ARGS),
            ("xsel", XSEL_ARGS),
        ]
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in clipboard_commands() {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(_) => continue,
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        if child.wait()?.success() {
            return Ok(());
        }
    }

    Err(FigmaError::Other("No clipboard tool available".to_string()))
}

/// Locations the Figma desktop app is installed to.
fn desktop_app_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if cfg!(target_os = "macos") {
        paths.push(PathBuf::from("/Applications/Figma.app"));
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join("Applications/Figma.app"));
        }
    } else if cfg!(target_os = "windows") {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            paths.push(PathBuf::from(local).join("Figma").join("Figma.exe"));
        }
    }
    paths
}

/// Whether the Figma desktop app is installed.
pub fn desktop_app_installed() -> bool {
    desktop_app_paths().iter().any(|p| p.exists())
}
