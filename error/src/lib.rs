#![no_std]

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Errno {
    AlreadyExists,
    Busy,
    DeviceError,
    DoesNotExist,
    InvalidArgument,
    NotSupported,
    OutOfMemory,
    PermissionDenied,
    TimedOut,
    WouldBlock,
}
