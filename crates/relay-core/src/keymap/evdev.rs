//! Key name to evdev key code table.
//!
//! Evdev codes are defined in `linux/input-event-codes.h`.
//! Reference: https://github.com/torvalds/linux/blob/master/include/uapi/linux/input-event-codes.h
//!
//! # Naming
//!
//! Names are lowercase.  Clients may send any case; [`lookup_key`] lowercases
//! before searching.  Most keys answer to several names: the evdev spelling
//! (`leftbrace`), the browser/pyautogui spelling (`bracketleft`) and, for
//! punctuation, the literal character (`[`).  Bare modifier names (`ctrl`,
//! `shift`, `alt`, `super`) resolve to the left-hand key.

use super::KeyCode;

/// Every known key name and its evdev code.
///
/// Names are unique; several names may share a code.
const KEY_TABLE: &[(&str, KeyCode)] = &[
    // Letters
    ("a", KeyCode(30)),
    ("b", KeyCode(48)),
    ("c", KeyCode(46)),
    ("d", KeyCode(32)),
    ("e", KeyCode(18)),
    ("f", KeyCode(33)),
    ("g", KeyCode(34)),
    ("h", KeyCode(35)),
    ("i", KeyCode(23)),
    ("j", KeyCode(36)),
    ("k", KeyCode(37)),
    ("l", KeyCode(38)),
    ("m", KeyCode(50)),
    ("n", KeyCode(49)),
    ("o", KeyCode(24)),
    ("p", KeyCode(25)),
    ("q", KeyCode(16)),
    ("r", KeyCode(19)),
    ("s", KeyCode(31)),
    ("t", KeyCode(20)),
    ("u", KeyCode(22)),
    ("v", KeyCode(47)),
    ("w", KeyCode(17)),
    ("x", KeyCode(45)),
    ("y", KeyCode(21)),
    ("z", KeyCode(44)),
    // Digits (top row)
    ("1", KeyCode(2)),
    ("2", KeyCode(3)),
    ("3", KeyCode(4)),
    ("4", KeyCode(5)),
    ("5", KeyCode(6)),
    ("6", KeyCode(7)),
    ("7", KeyCode(8)),
    ("8", KeyCode(9)),
    ("9", KeyCode(10)),
    ("0", KeyCode(11)),
    // Function keys
    ("f1", KeyCode(59)),
    ("f2", KeyCode(60)),
    ("f3", KeyCode(61)),
    ("f4", KeyCode(62)),
    ("f5", KeyCode(63)),
    ("f6", KeyCode(64)),
    ("f7", KeyCode(65)),
    ("f8", KeyCode(66)),
    ("f9", KeyCode(67)),
    ("f10", KeyCode(68)),
    ("f11", KeyCode(87)),
    ("f12", KeyCode(88)),
    ("f13", KeyCode(183)),
    ("f14", KeyCode(184)),
    ("f15", KeyCode(185)),
    ("f16", KeyCode(186)),
    ("f17", KeyCode(187)),
    ("f18", KeyCode(188)),
    ("f19", KeyCode(189)),
    ("f20", KeyCode(190)),
    ("f21", KeyCode(191)),
    ("f22", KeyCode(192)),
    ("f23", KeyCode(193)),
    ("f24", KeyCode(194)),
    // Modifiers
    ("ctrl", KeyCode::LEFT_CTRL),
    ("control", KeyCode::LEFT_CTRL),
    ("leftctrl", KeyCode::LEFT_CTRL),
    ("ctrlleft", KeyCode::LEFT_CTRL),
    ("rightctrl", KeyCode(97)),
    ("ctrlright", KeyCode(97)),
    ("shift", KeyCode::LEFT_SHIFT),
    ("leftshift", KeyCode::LEFT_SHIFT),
    ("shiftleft", KeyCode::LEFT_SHIFT),
    ("rightshift", KeyCode(54)),
    ("shiftright", KeyCode(54)),
    ("alt", KeyCode::LEFT_ALT),
    ("leftalt", KeyCode::LEFT_ALT),
    ("altleft", KeyCode::LEFT_ALT),
    ("rightalt", KeyCode(100)),
    ("altright", KeyCode(100)),
    ("altgr", KeyCode(100)),
    ("super", KeyCode::LEFT_META),
    ("meta", KeyCode::LEFT_META),
    ("win", KeyCode::LEFT_META),
    ("cmd", KeyCode::LEFT_META),
    ("leftmeta", KeyCode::LEFT_META),
    ("rightmeta", KeyCode(126)),
    ("capslock", KeyCode(58)),
    ("numlock", KeyCode(69)),
    ("scrolllock", KeyCode(70)),
    // Editing and whitespace
    ("enter", KeyCode(28)),
    ("return", KeyCode(28)),
    ("esc", KeyCode(1)),
    ("escape", KeyCode(1)),
    ("backspace", KeyCode(14)),
    ("tab", KeyCode(15)),
    ("space", KeyCode(57)),
    (" ", KeyCode(57)),
    ("insert", KeyCode(110)),
    ("delete", KeyCode(111)),
    ("del", KeyCode(111)),
    // Navigation
    ("home", KeyCode(102)),
    ("end", KeyCode(107)),
    ("pageup", KeyCode(104)),
    ("pgup", KeyCode(104)),
    ("pagedown", KeyCode(109)),
    ("pgdn", KeyCode(109)),
    ("up", KeyCode::UP),
    ("down", KeyCode::DOWN),
    ("left", KeyCode::LEFT),
    ("right", KeyCode::RIGHT),
    // System
    ("printscreen", KeyCode(99)),
    ("print", KeyCode(99)),
    ("sysrq", KeyCode(99)),
    ("pause", KeyCode(119)),
    ("menu", KeyCode(127)),
    ("compose", KeyCode(127)),
    ("power", KeyCode(116)),
    // Punctuation (unshifted)
    ("minus", KeyCode(12)),
    ("-", KeyCode(12)),
    ("equal", KeyCode(13)),
    ("=", KeyCode(13)),
    ("leftbrace", KeyCode(26)),
    ("bracketleft", KeyCode(26)),
    ("[", KeyCode(26)),
    ("rightbrace", KeyCode(27)),
    ("bracketright", KeyCode(27)),
    ("]", KeyCode(27)),
    ("semicolon", KeyCode(39)),
    (";", KeyCode(39)),
    ("apostrophe", KeyCode(40)),
    ("quote", KeyCode(40)),
    ("grave", KeyCode(41)),
    ("`", KeyCode(41)),
    ("backslash", KeyCode(43)),
    ("\\", KeyCode(43)),
    ("comma", KeyCode(51)),
    (",", KeyCode(51)),
    ("dot", KeyCode(52)),
    ("period", KeyCode(52)),
    (".", KeyCode(52)),
    ("slash", KeyCode(53)),
    ("/", KeyCode(53)),
    // Numpad
    ("kp0", KeyCode(82)),
    ("kp1", KeyCode(79)),
    ("kp2", KeyCode(80)),
    ("kp3", KeyCode(81)),
    ("kp4", KeyCode(75)),
    ("kp5", KeyCode(76)),
    ("kp6", KeyCode(77)),
    ("kp7", KeyCode(71)),
    ("kp8", KeyCode(72)),
    ("kp9", KeyCode(73)),
    ("kpdot", KeyCode(83)),
    ("kpplus", KeyCode(78)),
    ("kpminus", KeyCode(74)),
    ("kpasterisk", KeyCode(55)),
    ("kpslash", KeyCode(98)),
    ("kpenter", KeyCode(96)),
    ("kpequal", KeyCode(117)),
    // Media
    ("mute", KeyCode(113)),
    ("volumemute", KeyCode(113)),
    ("volumedown", KeyCode(114)),
    ("volumeup", KeyCode(115)),
    ("nextsong", KeyCode(163)),
    ("nexttrack", KeyCode(163)),
    ("playpause", KeyCode(164)),
    ("previoussong", KeyCode(165)),
    ("prevtrack", KeyCode(165)),
    ("stopcd", KeyCode(166)),
    ("stop", KeyCode(166)),
];

/// Resolves a key name to its evdev code.
///
/// The lookup is case-insensitive: `"Ctrl"`, `"CTRL"` and `"ctrl"` all
/// resolve to [`KeyCode::LEFT_CTRL`].  Returns `None` for unknown names.
pub fn lookup_key(name: &str) -> Option<KeyCode> {
    let name = name.to_lowercase();
    KEY_TABLE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|&(_, code)| code)
}

/// Iterates over every name known to [`lookup_key`].
pub fn key_names() -> impl Iterator<Item = &'static str> {
    KEY_TABLE.iter().map(|&(name, _)| name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
