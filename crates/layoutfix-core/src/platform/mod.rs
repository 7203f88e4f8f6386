// Layoutfix Platform Adapters
// Production implementations of the key-resolution capability

#[cfg(windows)]
pub mod windows;

#[cfg(windows)]
pub use windows::WinApiResolver;
