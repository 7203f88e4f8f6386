// Layoutfix Windows Resolver
// Key resolution backed by the Win32 keyboard-layout APIs

use windows_sys::Win32::Globalization::LCIDToLocaleName;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyboardLayoutList, MapVirtualKeyExW, ToUnicodeEx, HKL, MAPVK_VK_TO_VSC,
};

use crate::keystroke::VirtualKey;
use crate::resolver::{KeyResolver, LayoutError, LayoutHandle};

const VK_SHIFT: usize = 0x10;
const KEY_DOWN: u8 = 0x80;
const LOCALE_NAME_MAX_LENGTH: usize = 85;

/// Resolver backed by `GetKeyboardLayoutList` / `MapVirtualKeyExW` /
/// `ToUnicodeEx`.
///
/// Layout identifiers are BCP-47 locale names derived from each layout's
/// language identifier. The installed-layout list is re-queried on every
/// call, so handles stay valid across layout changes only for the duration
/// of one table build.
#[derive(Debug, Clone, Default)]
pub struct WinApiResolver;

impl WinApiResolver {
    pub fn new() -> Self {
        Self
    }

    fn layout_handles(&self) -> Vec<HKL> {
        unsafe {
            let count = GetKeyboardLayoutList(0, std::ptr::null_mut());
            if count <= 0 {
                return Vec::new();
            }
            let mut handles: Vec<HKL> = vec![std::mem::zeroed(); count as usize];
            let filled = GetKeyboardLayoutList(count, handles.as_mut_ptr());
            handles.truncate(filled.max(0) as usize);
            handles
        }
    }
}

/// Locale name for a layout handle's language identifier (the low word of
/// the HKL), e.g. "he-IL". Returns `None` for custom layouts the system
/// cannot name.
fn locale_name(hkl: HKL) -> Option<String> {
    let langid = (hkl as usize as u64 & 0xFFFF) as u32;
    let mut buffer = [0u16; LOCALE_NAME_MAX_LENGTH];
    let written =
        unsafe { LCIDToLocaleName(langid, buffer.as_mut_ptr(), buffer.len() as i32, 0) };
    if written <= 1 {
        return None;
    }
    // `written` includes the terminating NUL
    Some(String::from_utf16_lossy(&buffer[..(written - 1) as usize]))
}

impl KeyResolver for WinApiResolver {
    fn installed_layouts(&self) -> Vec<String> {
        self.layout_handles()
            .into_iter()
            .filter_map(locale_name)
            .collect()
    }

    fn resolve_handle(&self, layout_id: &str) -> Result<LayoutHandle, LayoutError> {
        for hkl in self.layout_handles() {
            if let Some(name) = locale_name(hkl) {
                if name.eq_ignore_ascii_case(layout_id) {
                    return Ok(LayoutHandle::from_raw(hkl as usize as u64));
                }
            }
        }
        Err(LayoutError::LayoutNotFound(layout_id.to_string()))
    }

    fn resolve_char(&self, handle: &LayoutHandle, vk: VirtualKey, shift: bool) -> Option<char> {
        let hkl = handle.raw() as usize as HKL;
        let mut state = [0u8; 256];
        if shift {
            state[VK_SHIFT] = KEY_DOWN;
        }

        let mut buffer = [0u16; 16];
        let produced = unsafe {
            let scan = MapVirtualKeyExW(vk.code() as u32, MAPVK_VK_TO_VSC, hkl);
            ToUnicodeEx(
                vk.code() as u32,
                scan,
                state.as_ptr(),
                buffer.as_mut_ptr(),
                buffer.len() as i32,
                0,
                hkl,
            )
        };

        // <= 0 covers dead keys and keys with no translation
        if produced <= 0 {
            return None;
        }

        char::decode_utf16(buffer[..produced as usize].iter().copied())
            .next()?
            .ok()
    }
}
