mod notice;
mod request_id;

pub use notice::{Notice, NoticeLevel, Notices};
pub use request_id::{LatestOnly, RequestId};
