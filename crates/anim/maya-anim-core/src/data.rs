//! Per-file animation model: documents, bone tracks and rotation channels.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::channel::{QuatChannel, RawChannel};
use crate::curve::ChannelCurve;

/// Quaternion component curves for one bone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuatCurves {
    pub w: ChannelCurve,
    pub x: ChannelCurve,
    pub y: ChannelCurve,
    pub z: ChannelCurve,
}

impl QuatCurves {
    pub fn get(&self, channel: QuatChannel) -> &ChannelCurve {
        match channel {
            QuatChannel::W => &self.w,
            QuatChannel::X => &self.x,
            QuatChannel::Y => &self.y,
            QuatChannel::Z => &self.z,
        }
    }

    pub fn get_mut(&mut self, channel: QuatChannel) -> &mut ChannelCurve {
        match channel {
            QuatChannel::W => &mut self.w,
            QuatChannel::X => &mut self.x,
            QuatChannel::Y => &mut self.y,
            QuatChannel::Z => &mut self.z,
        }
    }

    /// Append one sample to all four component curves.
    pub fn push(&mut self, time: f32, [w, x, y, z]: [f32; 4]) {
        self.w.add_keyframe(time, w);
        self.x.add_keyframe(time, x);
        self.y.add_keyframe(time, y);
        self.z.add_keyframe(time, z);
    }

    /// Evaluate all four components at `time` as `[w, x, y, z]`.
    pub fn evaluate(&self, time: f32) -> [f32; 4] {
        [
            self.w.evaluate(time),
            self.x.evaluate(time),
            self.y.evaluate(time),
            self.z.evaluate(time),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuatChannel, &ChannelCurve)> {
        QuatChannel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Rotation state of a track. Euler and quaternion curves never coexist.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "curves", rename_all = "camelCase")]
pub enum Rotation {
    #[default]
    None,
    /// Raw Euler curves in degrees, indexed x/y/z; any subset may be present.
    Euler([Option<ChannelCurve>; 3]),
    Quaternion(QuatCurves),
}

/// All channels animated for one bone within one document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneTrack {
    pub bone: String,
    /// Scene path, filled in by the assembler from the bone path mapping.
    #[serde(default)]
    pub path: Option<String>,
    pub position: [Option<ChannelCurve>; 3],
    pub rotation: Rotation,
    pub scale: [Option<ChannelCurve>; 3],
}

impl BoneTrack {
    pub fn new(bone: impl Into<String>) -> Self {
        Self {
            bone: bone.into(),
            path: None,
            position: Default::default(),
            rotation: Rotation::None,
            scale: Default::default(),
        }
    }

    /// Attach or replace the curve for `channel`.
    ///
    /// Setting an Euler channel on a track that already holds quaternion
    /// curves discards them, keeping the two representations exclusive.
    pub fn set_channel(&mut self, channel: RawChannel, curve: ChannelCurve) {
        let axis = channel.axis();
        match channel {
            RawChannel::PosX | RawChannel::PosY | RawChannel::PosZ => {
                self.position[axis] = Some(curve)
            }
            RawChannel::ScaleX | RawChannel::ScaleY | RawChannel::ScaleZ => {
                self.scale[axis] = Some(curve)
            }
            RawChannel::EulerX | RawChannel::EulerY | RawChannel::EulerZ => {
                if let Rotation::Euler(axes) = &mut self.rotation {
                    axes[axis] = Some(curve);
                } else {
                    if matches!(self.rotation, Rotation::Quaternion(_)) {
                        log::debug!(
                            "bone '{}': Euler channel replaces converted quaternion curves",
                            self.bone
                        );
                    }
                    let mut axes: [Option<ChannelCurve>; 3] = Default::default();
                    axes[axis] = Some(curve);
                    self.rotation = Rotation::Euler(axes);
                }
            }
        }
    }

    pub fn channel(&self, channel: RawChannel) -> Option<&ChannelCurve> {
        let axis = channel.axis();
        match channel {
            RawChannel::PosX | RawChannel::PosY | RawChannel::PosZ => self.position[axis].as_ref(),
            RawChannel::ScaleX | RawChannel::ScaleY | RawChannel::ScaleZ => {
                self.scale[axis].as_ref()
            }
            RawChannel::EulerX | RawChannel::EulerY | RawChannel::EulerZ => match &self.rotation {
                Rotation::Euler(axes) => axes[axis].as_ref(),
                _ => None,
            },
        }
    }

    /// Take the curve for `channel` out of the track, if it is present.
    pub fn remove_channel(&mut self, channel: RawChannel) -> Option<ChannelCurve> {
        let axis = channel.axis();
        match channel {
            RawChannel::PosX | RawChannel::PosY | RawChannel::PosZ => self.position[axis].take(),
            RawChannel::ScaleX | RawChannel::ScaleY | RawChannel::ScaleZ => self.scale[axis].take(),
            RawChannel::EulerX | RawChannel::EulerY | RawChannel::EulerZ => match &mut self.rotation {
                Rotation::Euler(axes) => axes[axis].take(),
                _ => None,
            },
        }
    }

    pub fn has_euler(&self) -> bool {
        matches!(&self.rotation, Rotation::Euler(axes) if axes.iter().any(Option::is_some))
    }

    pub fn quaternion(&self) -> Option<&QuatCurves> {
        match &self.rotation {
            Rotation::Quaternion(q) => Some(q),
            _ => None,
        }
    }

    /// Populated position/scale channels, paired with their ids.
    pub fn transform_channels(&self) -> impl Iterator<Item = (RawChannel, &ChannelCurve)> {
        RawChannel::ALL
            .into_iter()
            .filter(|c| !c.is_euler())
            .filter_map(move |c| self.channel(c).map(|curve| (c, curve)))
    }

    /// Mutable access to every populated curve, whatever its representation.
    pub fn curves_mut(&mut self) -> impl Iterator<Item = &mut ChannelCurve> {
        let rotation: Vec<&mut ChannelCurve> = match &mut self.rotation {
            Rotation::None => Vec::new(),
            Rotation::Euler(axes) => axes.iter_mut().flatten().collect(),
            Rotation::Quaternion(q) => vec![&mut q.w, &mut q.x, &mut q.y, &mut q.z],
        };
        self.position
            .iter_mut()
            .flatten()
            .chain(rotation)
            .chain(self.scale.iter_mut().flatten())
    }
}

/// One parsed input file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationDocument {
    /// File stem of the source file.
    pub name: String,
    /// Clip end, in seconds.
    pub end_time: f32,
    /// Source header fields (`animVersion`, `timeUnit`, ...) in file order.
    #[serde(default)]
    pub header: IndexMap<String, String>,
    /// Bone tracks keyed by bone name, in order of first reference.
    pub tracks: IndexMap<String, BoneTrack>,
}

impl AnimationDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            end_time: 0.0,
            header: IndexMap::new(),
            tracks: IndexMap::new(),
        }
    }

    /// Get or create the track for `bone`.
    pub fn track_mut(&mut self, bone: &str) -> &mut BoneTrack {
        self.tracks
            .entry(bone.to_string())
            .or_insert_with(|| BoneTrack::new(bone))
    }

    pub fn track(&self, bone: &str) -> Option<&BoneTrack> {
        self.tracks.get(bone)
    }
}
