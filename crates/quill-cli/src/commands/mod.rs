//! CLI command implementations

pub(crate) mod down;
pub(crate) mod init;
pub(crate) mod new;
pub(crate) mod output;
pub(crate) mod seed;
pub(crate) mod seed_init;
pub(crate) mod seed_new;
pub(crate) mod seed_status;
pub(crate) mod status;
pub(crate) mod up;
