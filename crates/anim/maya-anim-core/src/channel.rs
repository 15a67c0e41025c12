//! Channel identifiers and the source-attribute lookup table.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Scalar channel as read from the source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawChannel {
    PosX,
    PosY,
    PosZ,
    EulerX,
    EulerY,
    EulerZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl RawChannel {
    pub const ALL: [RawChannel; 9] = [
        RawChannel::PosX,
        RawChannel::PosY,
        RawChannel::PosZ,
        RawChannel::EulerX,
        RawChannel::EulerY,
        RawChannel::EulerZ,
        RawChannel::ScaleX,
        RawChannel::ScaleY,
        RawChannel::ScaleZ,
    ];

    /// Axis slot within the channel's group: 0 = x, 1 = y, 2 = z.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            RawChannel::PosX | RawChannel::EulerX | RawChannel::ScaleX => 0,
            RawChannel::PosY | RawChannel::EulerY | RawChannel::ScaleY => 1,
            RawChannel::PosZ | RawChannel::EulerZ | RawChannel::ScaleZ => 2,
        }
    }

    #[inline]
    pub fn is_euler(self) -> bool {
        matches!(
            self,
            RawChannel::EulerX | RawChannel::EulerY | RawChannel::EulerZ
        )
    }

    /// Engine transform property the channel binds to. Euler channels never
    /// reach a clip; their names are only used in diagnostics.
    pub fn property_name(self) -> &'static str {
        match self {
            RawChannel::PosX => "localPosition.x",
            RawChannel::PosY => "localPosition.y",
            RawChannel::PosZ => "localPosition.z",
            RawChannel::EulerX => "localEuler.x",
            RawChannel::EulerY => "localEuler.y",
            RawChannel::EulerZ => "localEuler.z",
            RawChannel::ScaleX => "localScale.x",
            RawChannel::ScaleY => "localScale.y",
            RawChannel::ScaleZ => "localScale.z",
        }
    }
}

/// Quaternion component channel produced by rotation conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuatChannel {
    W,
    X,
    Y,
    Z,
}

impl QuatChannel {
    pub const ALL: [QuatChannel; 4] = [QuatChannel::W, QuatChannel::X, QuatChannel::Y, QuatChannel::Z];

    pub fn property_name(self) -> &'static str {
        match self {
            QuatChannel::W => "localRotation.w",
            QuatChannel::X => "localRotation.x",
            QuatChannel::Y => "localRotation.y",
            QuatChannel::Z => "localRotation.z",
        }
    }
}

/// Immutable mapping from source attribute names (`translateX`, ...) to
/// [`RawChannel`]s. Built once and shared by every parse in a run.
#[derive(Clone, Debug)]
pub struct ChannelTable {
    entries: HashMap<String, RawChannel>,
}

impl ChannelTable {
    pub fn new(entries: impl IntoIterator<Item = (String, RawChannel)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The Maya attribute names for translate/rotate/scale.
    pub fn maya() -> Self {
        Self::new(
            [
                ("translateX", RawChannel::PosX),
                ("translateY", RawChannel::PosY),
                ("translateZ", RawChannel::PosZ),
                ("rotateX", RawChannel::EulerX),
                ("rotateY", RawChannel::EulerY),
                ("rotateZ", RawChannel::EulerZ),
                ("scaleX", RawChannel::ScaleX),
                ("scaleY", RawChannel::ScaleY),
                ("scaleZ", RawChannel::ScaleZ),
            ]
            .into_iter()
            .map(|(name, channel)| (name.to_string(), channel)),
        )
    }

    #[inline]
    pub fn resolve(&self, name: &str) -> Option<RawChannel> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::maya()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maya_table_covers_every_raw_channel() {
        let table = ChannelTable::default();
        assert_eq!(table.len(), RawChannel::ALL.len());
        assert_eq!(table.resolve("translateX"), Some(RawChannel::PosX));
        assert_eq!(table.resolve("rotateY"), Some(RawChannel::EulerY));
        assert_eq!(table.resolve("scaleZ"), Some(RawChannel::ScaleZ));
        assert_eq!(table.resolve("visibility"), None);
    }

    #[test]
    fn axis_and_group_helpers() {
        assert_eq!(RawChannel::EulerZ.axis(), 2);
        assert!(RawChannel::EulerX.is_euler());
        assert!(!RawChannel::ScaleX.is_euler());
        assert_eq!(RawChannel::PosY.property_name(), "localPosition.y");
        assert_eq!(QuatChannel::W.property_name(), "localRotation.w");
    }
}
