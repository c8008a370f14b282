//! Logging shim over `log` and `defmt`.
//!
//! Call sites use these macros unconditionally; they forward to whichever
//! backend is enabled and compile to nothing when neither is. `macro_use`
//! puts them in scope for every module declared after this one.

#![macro_use]
#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::trace!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        { let _ = || { format_args!($($arg)*); }; }
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::debug!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        { let _ = || { format_args!($($arg)*); }; }
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::warn!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        { let _ = || { format_args!($($arg)*); }; }
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
        #[cfg(all(feature = "defmt", not(feature = "log")))]
        ::defmt::error!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        { let _ = || { format_args!($($arg)*); }; }
    }};
}
