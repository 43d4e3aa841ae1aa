//! Bone/keyframe skeletal animation types.

use glam::Vec2;
use std::sync::Arc;

use crate::atlas::TextureRegion;

/// One bone's pose within a keyframe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bone {
    pub name: String,
    pub visible: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Index into [`SkeletalAnimation::regions`], `None` for a bone without an image
    pub texture_index: Option<usize>,
    /// Index of the parent bone within the same keyframe, `None` for roots
    pub parent_index: Option<usize>,
    pub position: Vec2,
    pub rotation: f32,
}

/// Pose of every bone at one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframe {
    pub frame_number: i32,
    /// `frame_number / frame_rate`, in seconds
    pub frame_time: f32,
    /// Event label for playback consumers, may be empty
    pub trigger: String,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Bones in declaration order; indices are load-bearing
    pub bones: Vec<Bone>,
}

impl Keyframe {
    /// Parent of the bone at `index`.
    pub fn parent_of(&self, index: usize) -> Option<&Bone> {
        self.bones
            .get(index)
            .and_then(|bone| bone.parent_index)
            .and_then(|parent| self.bones.get(parent))
    }

    /// Indices of the bones whose parent is `index`.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(move |(_, bone)| bone.parent_index == Some(index))
            .map(|(i, _)| i)
    }

    /// Indices of bones without a parent.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, bone)| bone.parent_index.is_none())
            .map(|(i, _)| i)
    }

    /// True when `trigger` is non-empty.
    pub fn has_trigger(&self) -> bool {
        !self.trigger.is_empty()
    }
}

/// A hierarchical bone animation over one atlas texture.
///
/// Every keyframe has the same number of bones.
#[derive(Debug)]
pub struct SkeletalAnimation<T> {
    pub frame_rate: i32,
    pub loop_frame: i32,
    /// `loop_frame / frame_rate`, in seconds
    pub loop_time: f32,
    pub texture: Arc<T>,
    /// Resolved regions, referenced by [`Bone::texture_index`]
    pub regions: Vec<TextureRegion>,
    pub keyframes: Vec<Keyframe>,
}

impl<T> SkeletalAnimation<T> {
    /// Bones per keyframe, 0 for an animation without keyframes.
    pub fn bone_count(&self) -> usize {
        self.keyframes.first().map_or(0, |k| k.bones.len())
    }

    /// Region drawn by a bone, `None` when it draws nothing.
    pub fn region_for(&self, bone: &Bone) -> Option<&TextureRegion> {
        bone.texture_index.and_then(|index| self.regions.get(index))
    }

    /// Time of the last keyframe, in seconds.
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.frame_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bone(name: &str, parent: Option<usize>) -> Bone {
        Bone {
            name: name.to_string(),
            visible: true,
            texture_index: Some(0),
            parent_index: parent,
            ..Default::default()
        }
    }

    fn body() -> Keyframe {
        Keyframe {
            bones: vec![
                bone("torso", None),
                bone("head", Some(0)),
                bone("arm", Some(0)),
                bone("hand", Some(2)),
                bone("shadow", None),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_hierarchy_queries() {
        let kf = body();
        assert_eq!(kf.roots().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(kf.children_of(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(kf.children_of(2).collect::<Vec<_>>(), vec![3]);
        assert_eq!(kf.parent_of(3).map(|b| b.name.as_str()), Some("arm"));
        assert!(kf.parent_of(0).is_none());
        assert!(kf.parent_of(99).is_none());
    }

    #[test]
    fn test_animation_helpers() {
        let anim = SkeletalAnimation {
            frame_rate: 10,
            loop_frame: 0,
            loop_time: 0.0,
            texture: Arc::new(()),
            regions: vec![TextureRegion::new(0, 0, 4, 4)],
            keyframes: vec![
                body(),
                Keyframe {
                    frame_number: 5,
                    frame_time: 0.5,
                    ..body()
                },
            ],
        };
        assert_eq!(anim.bone_count(), 5);
        assert_eq!(anim.duration(), 0.5);
        assert!(anim.region_for(&anim.keyframes[0].bones[0]).is_some());

        let hidden = Bone {
            texture_index: None,
            ..bone("marker", None)
        };
        assert!(anim.region_for(&hidden).is_none());
    }
}
