use bytemuck::{Pod, Zeroable};

/// Constants of the ray traced ground truth, used only during development to compare against.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ReferenceRtaoConstants {
    pub total_rays_length: f32, // similar to the GTAO radius
    pub albedo: f32,            // assumed average material albedo
    pub max_bounces: i32,
    // Frames accumulated since the last reset. 0 means this is the first one.
    pub accumulated_frames: i32,
    pub accumulate_frame_max: i32,
    pub padding0: i32,
    pub padding1: i32,
    pub padding2: i32,
}

const _: () = assert!(core::mem::size_of::<ReferenceRtaoConstants>() == 32);

impl Default for ReferenceRtaoConstants {
    fn default() -> Self {
        Self {
            total_rays_length: 1.0,
            albedo: 0.0,
            max_bounces: 1,
            accumulated_frames: 0,
            accumulate_frame_max: 256,
            padding0: 0,
            padding1: 0,
            padding2: 0,
        }
    }
}

impl ReferenceRtaoConstants {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn read_from(bytes: &[u8]) -> Result<Self, bytemuck::PodCastError> {
        bytemuck::try_pod_read_unaligned(bytes)
    }

    pub fn accumulation_done(&self) -> bool {
        self.accumulated_frames >= self.accumulate_frame_max
    }

    /// Counts one more accumulated frame, stopping at `accumulate_frame_max`.
    pub fn advance(&mut self) {
        if !self.accumulation_done() {
            self.accumulated_frames += 1;
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_frames = 0;
    }
}

#[test]
fn test_byte_round_trip() {
    let consts = ReferenceRtaoConstants {
        total_rays_length: 2.5,
        albedo: 0.4,
        max_bounces: 3,
        accumulated_frames: 17,
        accumulate_frame_max: 1024,
        ..Default::default()
    };

    let bytes = consts.as_bytes();
    assert_eq!(bytes.len(), 32);
    assert_eq!(&bytes[8..12], &3i32.to_ne_bytes());
    assert_eq!(ReferenceRtaoConstants::read_from(bytes), Ok(consts));
}

#[test]
fn test_accumulation() {
    let mut consts = ReferenceRtaoConstants {
        accumulate_frame_max: 2,
        ..Default::default()
    };

    assert!(!consts.accumulation_done());
    consts.advance();
    consts.advance();
    assert!(consts.accumulation_done());
    consts.advance();
    assert_eq!(consts.accumulated_frames, 2);

    consts.reset();
    assert_eq!(consts.accumulated_frames, 0);
    assert!(!consts.accumulation_done());
}
