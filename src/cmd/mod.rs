pub mod calendar;
pub mod campaigns;
pub mod init;
pub mod root;
pub mod summary;
