mod health;
mod recordings;

pub use health::{health, HealthResponse};
pub use recordings::{
    list_recordings, stream_recording, upload_recording, RecordingResponse, UploadResponse,
};
