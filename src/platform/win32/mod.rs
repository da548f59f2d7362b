// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules in the crate where `unsafe` code is permitted
// (the other is `platform::unix`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

pub(crate) mod console; // UTF-8 console output code page
pub(crate) mod lock; // LockFileEx advisory locks
pub(crate) mod registry; // HKCU DWORD reads
