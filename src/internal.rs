pub mod checksum;
pub mod client;
pub mod entrance {
    pub mod remote;
}
pub mod getting_task;
pub mod progress;
