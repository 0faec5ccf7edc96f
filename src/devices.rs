// Camera and microphone capability.
//
// Panels only see the `MediaDevices` trait. The desktop build plugs in
// `SimulatedDevices`, driven by the permissions in the app config, and tests
// plug in counting doubles.

use std::collections::HashSet;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;

/// Which tracks a panel wants from the capture devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

impl MediaConstraints {
    pub const AUDIO_VIDEO: Self = Self {
        video: true,
        audio: true,
    };
}

/// An open capture stream. Not `Clone`: releasing consumes the handle, so a stream
/// can only ever be released once.
#[derive(Debug, PartialEq, Eq)]
pub struct MediaStream {
    id: u64,
    constraints: MediaConstraints,
}

impl MediaStream {
    pub fn new(id: u64, constraints: MediaConstraints) -> Self {
        Self { id, constraints }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn has_video(&self) -> bool {
        self.constraints.video
    }

    pub fn has_audio(&self) -> bool {
        self.constraints.audio
    }
}

pub trait MediaDevices {
    fn acquire_stream(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, PrepVistaError>;

    /// Stops every track of the stream.
    fn release(&mut self, stream: MediaStream);
}

/// Device permissions granted to the simulated capture devices.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DevicePermissions {
    pub camera: bool,
    pub microphone: bool,
}

impl Default for DevicePermissions {
    fn default() -> Self {
        Self {
            camera: true,
            microphone: true,
        }
    }
}

/// Stand-in for real capture hardware. Grants streams according to
/// [`DevicePermissions`] and tracks which streams are still open.
#[derive(Debug, Default)]
pub struct SimulatedDevices {
    permissions: DevicePermissions,
    next_stream_id: u64,
    open_streams: HashSet<u64>,
}

impl SimulatedDevices {
    pub fn new(permissions: DevicePermissions) -> Self {
        Self {
            permissions,
            next_stream_id: 1,
            open_streams: HashSet::new(),
        }
    }

    pub fn open_streams(&self) -> usize {
        self.open_streams.len()
    }
}

impl MediaDevices for SimulatedDevices {
    fn acquire_stream(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, PrepVistaError> {
        if constraints.video && !self.permissions.camera {
            warn!("Camera access denied");
            return Err(PrepVistaError::PermissionDenied {
                device: "camera".to_string(),
            });
        }
        if constraints.audio && !self.permissions.microphone {
            warn!("Microphone access denied");
            return Err(PrepVistaError::PermissionDenied {
                device: "microphone".to_string(),
            });
        }

        let id = self.next_stream_id;
        self.next_stream_id += 1;
        self.open_streams.insert(id);
        info!("Opened capture stream {id}");
        Ok(MediaStream::new(id, constraints))
    }

    fn release(&mut self, stream: MediaStream) {
        if self.open_streams.remove(&stream.id()) {
            debug!("Stopped capture stream {}", stream.id());
        } else {
            warn!("Released unknown capture stream {}", stream.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let stream = devices
            .acquire_stream(MediaConstraints::AUDIO_VIDEO)
            .unwrap();
        assert!(stream.has_video() && stream.has_audio());
        assert_eq!(devices.open_streams(), 1);

        devices.release(stream);
        assert_eq!(devices.open_streams(), 0);
    }

    #[test]
    fn test_camera_denied() {
        let mut devices = SimulatedDevices::new(DevicePermissions {
            camera: false,
            microphone: true,
        });
        let err = devices
            .acquire_stream(MediaConstraints::AUDIO_VIDEO)
            .unwrap_err();
        assert!(matches!(err, PrepVistaError::PermissionDenied { ref device } if device == "camera"));
        assert_eq!(devices.open_streams(), 0);
    }

    #[test]
    fn test_audio_only_ignores_camera_permission() {
        let mut devices = SimulatedDevices::new(DevicePermissions {
            camera: false,
            microphone: true,
        });
        let stream = devices.acquire_stream(MediaConstraints {
            video: false,
            audio: true,
        });
        assert!(stream.is_ok());
    }
}
