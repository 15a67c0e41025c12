//! Bone track assembly: rotation conversion, hold padding, path resolution
//! and clip binding.

use hashbrown::HashSet;

use crate::channel::RawChannel;
use crate::clip::AnimationClip;
use crate::config::{Config, MissingBonePolicy};
use crate::convert::euler_curves_to_quaternion;
use crate::curve::ChannelCurve;
use crate::data::{AnimationDocument, BoneTrack, Rotation};
use crate::error::ImportError;
use crate::mapping::BonePathMapping;
use crate::parser::FRAME_RATE;

/// Drop keyless channels, convert Euler rotation to quaternion curves (when
/// present) and pad every single-key curve into a hold ending at `end_time`.
///
/// Every curve left on the track afterwards has at least two keys.
pub fn prepare_track(track: &mut BoneTrack, end_time: f32, continuity: bool) {
    drop_empty_channels(track);
    if let Rotation::Euler(axes) = &track.rotation {
        if axes.iter().any(Option::is_some) {
            track.rotation = Rotation::Quaternion(euler_curves_to_quaternion(axes, continuity));
        } else {
            track.rotation = Rotation::None;
        }
    }
    for curve in track.curves_mut() {
        curve.finalize_duration(end_time);
    }
}

fn drop_empty_channels(track: &mut BoneTrack) {
    for channel in RawChannel::ALL {
        if track.channel(channel).is_some_and(ChannelCurve::is_empty) {
            log::warn!(
                "bone '{}': {:?} channel has no keyframes; ignoring it",
                track.bone,
                channel
            );
            track.remove_channel(channel);
        }
    }
}

/// Turns parsed documents into clips. Holds the batch-wide record of missing
/// bones so each is reported once.
#[derive(Debug)]
pub struct Assembler<'a> {
    mapping: &'a BonePathMapping,
    policy: MissingBonePolicy,
    continuity: bool,
    reported: HashSet<String>,
}

impl<'a> Assembler<'a> {
    pub fn new(mapping: &'a BonePathMapping, config: &Config) -> Self {
        Self {
            mapping,
            policy: config.missing_bone,
            continuity: config.quaternion_continuity,
            reported: HashSet::new(),
        }
    }

    /// Bone names that had no mapping entry so far, in no particular order.
    pub fn missing_bones(&self) -> impl Iterator<Item = &str> {
        self.reported.iter().map(String::as_str)
    }

    /// Assemble `doc` into a clip.
    ///
    /// Under [`MissingBonePolicy::SkipTrack`] a bone without a mapping entry
    /// loses its track; under `AbortBatch` the `Mapping` error is returned.
    pub fn assemble(&mut self, doc: AnimationDocument) -> Result<AnimationClip, ImportError> {
        let mut clip = AnimationClip::new(doc.name.as_str(), doc.end_time, FRAME_RATE);
        for (bone, mut track) in doc.tracks {
            let path = match self.mapping.resolve(&bone) {
                Ok(path) => path.to_string(),
                Err(err) => {
                    let first_report = self.reported.insert(bone.clone());
                    match self.policy {
                        MissingBonePolicy::SkipTrack => {
                            if first_report {
                                log::warn!("{err}; skipping its track");
                            }
                            continue;
                        }
                        MissingBonePolicy::AbortBatch => {
                            log::error!("'{}': {err}", doc.name);
                            return Err(err);
                        }
                    }
                }
            };

            prepare_track(&mut track, doc.end_time, self.continuity);
            bind_track(&mut clip, &path, &track);
            track.path = Some(path);
        }
        log::debug!(
            "assembled '{}': {} binding(s)",
            clip.name,
            clip.bindings.len()
        );
        Ok(clip)
    }
}

fn bind_track(clip: &mut AnimationClip, path: &str, track: &BoneTrack) {
    for (channel, curve) in track.transform_channels() {
        clip.set_curve(path, channel.property_name(), curve.clone());
    }
    if let Some(quat) = track.quaternion() {
        for (channel, curve) in quat.iter() {
            clip.set_curve(path, channel.property_name(), curve.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_track_drops_empty_euler_state() {
        let mut track = BoneTrack::new("HipN");
        track.rotation = Rotation::Euler(Default::default());
        prepare_track(&mut track, 1.0, false);
        assert_eq!(track.rotation, Rotation::None);
    }

    #[test]
    fn prepare_track_drops_keyless_channels() {
        let mut track = BoneTrack::new("HipN");
        track.set_channel(RawChannel::PosY, ChannelCurve::new());
        track.set_channel(RawChannel::EulerX, ChannelCurve::new());
        track.set_channel(RawChannel::EulerY, ChannelCurve::constant(0.0, 30.0));
        prepare_track(&mut track, 1.0, false);

        assert!(track.channel(RawChannel::PosY).is_none());
        let quat = track.quaternion().expect("rotation converted");
        assert!(quat.iter().all(|(_, c)| c.len() == 2));
        assert_eq!(quat.x.keys()[0].value, 0.0);
    }

    #[test]
    fn prepare_track_converts_and_pads() {
        let mut track = BoneTrack::new("HipN");
        track.set_channel(RawChannel::EulerX, ChannelCurve::constant(0.0, 90.0));
        track.set_channel(RawChannel::ScaleX, ChannelCurve::constant(0.0, 2.0));
        prepare_track(&mut track, 1.5, false);

        let quat = track.quaternion().expect("rotation converted");
        assert_eq!(quat.w.len(), 2);
        assert_eq!(quat.w.last().unwrap().time, 1.5);
        assert_eq!(track.channel(RawChannel::ScaleX).unwrap().len(), 2);
        assert!(!track.has_euler());
    }
}
