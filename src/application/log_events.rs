//! Stable numeric ids attached to log lines as the `event_id` field
//!
//! 1xxx: successful operations, 4xxx: missing entities, 5xxx: failures.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum LogEvent {
    GetItem = 1000,
    UploadItem = 1001,
    UpdateItem = 1002,
    DeleteItem = 1003,
    InvalidItem = 1004,
    GetItemList = 1005,
    GetItemNotFound = 4000,
    UpdateItemNotFound = 4001,
    DeleteItemNotFound = 4002,
    ContainerNotFound = 4003,
    InternalError = 5000,
    UploadItemError = 5001,
    UpdateItemError = 5002,
    DeleteItemError = 5003,
    GetItemError = 5004,
}

impl LogEvent {
    pub fn id(self) -> u16 {
        self as u16
    }
}
