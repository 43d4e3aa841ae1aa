//! Bone/keyframe animation loader
//!
//! ```xml
//! <Animation>
//!   <FrameRate>24</FrameRate>
//!   <LoopFrame>48</LoopFrame>
//!   <Texture>torso</Texture>
//!   <Keyframe frame="0" vflip="false" hflip="false" trigger="">
//!     <Bone name="torso">
//!       <Hidden>False</Hidden>
//!       <TextureFlipHorizontal>False</TextureFlipHorizontal>
//!       <TextureFlipVertical>False</TextureFlipVertical>
//!       <ParentIndex>-1</ParentIndex>
//!       <TextureIndex>0</TextureIndex>
//!       <Position><X>0</X><Y>0</Y></Position>
//!       <Rotation>0</Rotation>
//!     </Bone>
//!   </Keyframe>
//! </Animation>
//! ```

use std::sync::Arc;

use roxmltree::Node;

use crate::atlas::{self, TextureDictionary};
use crate::document::{parse_document, root_element, ElementExt};
use crate::error::{LoadError, SchemaError};
use crate::models::{Bone, Keyframe, SkeletalAnimation};

/// Parse a skeletal animation, resolving its regions in `dictionary`.
pub fn parse_skeletal_animation<T>(
    source: &str,
    texture: Arc<T>,
    dictionary: &TextureDictionary,
) -> Result<SkeletalAnimation<T>, LoadError> {
    let document = parse_document(source)?;
    let root = root_element(&document, "Animation")?;

    let frame_rate: i32 = root.parse_child("FrameRate", "integer")?;
    if frame_rate <= 0 {
        return Err(SchemaError::InvalidFrameRate(frame_rate).into());
    }
    let seconds_per_frame = 1.0 / frame_rate as f32;

    let loop_frame: i32 = root.parse_child("LoopFrame", "integer")?;

    let regions = atlas::resolve_all(
        dictionary,
        root.children_named("Texture").map(|n| n.text_value()),
    )?;

    let keyframes = root
        .children_named("Keyframe")
        .enumerate()
        .map(|(index, node)| parse_keyframe(node, index, seconds_per_frame, regions.len()))
        .collect::<Result<Vec<_>, LoadError>>()?;

    check_bone_counts(&keyframes)?;

    tracing::trace!(
        frame_rate,
        regions = regions.len(),
        keyframes = keyframes.len(),
        "parsed skeletal animation"
    );

    Ok(SkeletalAnimation {
        frame_rate,
        loop_frame,
        loop_time: loop_frame as f32 * seconds_per_frame,
        texture,
        regions,
        keyframes,
    })
}

fn parse_keyframe(
    node: Node<'_, '_>,
    keyframe: usize,
    seconds_per_frame: f32,
    region_count: usize,
) -> Result<Keyframe, LoadError> {
    let frame_number: i32 = node.require_attr("frame", "integer")?;

    let raw = node
        .children_named("Bone")
        .map(parse_bone)
        .collect::<Result<Vec<_>, _>>()?;

    let bone_count = raw.len();
    let bones = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.validate(keyframe, index, bone_count, region_count))
        .collect::<Result<Vec<_>, _>>()?;

    check_acyclic(keyframe, &bones)?;

    Ok(Keyframe {
        frame_number,
        frame_time: frame_number as f32 * seconds_per_frame,
        trigger: node.attr_or_empty("trigger").to_string(),
        flip_horizontal: node.attr_flag("hflip")?,
        flip_vertical: node.attr_flag("vflip")?,
        bones,
    })
}

/// Bone as declared, before its indices are checked.
struct RawBone {
    bone: Bone,
    parent: i64,
    texture: i64,
}

impl RawBone {
    fn validate(
        mut self,
        keyframe: usize,
        index: usize,
        bone_count: usize,
        region_count: usize,
    ) -> Result<Bone, SchemaError> {
        self.bone.parent_index = if self.parent < 0 {
            None
        } else {
            match usize::try_from(self.parent) {
                Ok(parent) if parent < bone_count => Some(parent),
                _ => {
                    return Err(SchemaError::ParentIndexOutOfRange {
                        keyframe,
                        bone: index,
                        index: self.parent,
                        len: bone_count,
                    })
                }
            }
        };

        self.bone.texture_index = if self.texture < 0 {
            None
        } else {
            match usize::try_from(self.texture) {
                Ok(texture) if texture < region_count => Some(texture),
                _ => {
                    return Err(SchemaError::TextureIndexOutOfRange {
                        keyframe,
                        bone: index,
                        index: self.texture,
                        len: region_count,
                    })
                }
            }
        };

        Ok(self.bone)
    }
}

fn parse_bone(node: Node<'_, '_>) -> Result<RawBone, LoadError> {
    let bone = Bone {
        name: node.attr_or_empty("name").to_string(),
        visible: !node.child_flag("Hidden")?,
        flip_horizontal: node.child_flag("TextureFlipHorizontal")?,
        flip_vertical: node.child_flag("TextureFlipVertical")?,
        texture_index: None,
        parent_index: None,
        position: node.vector2("Position")?,
        rotation: node.parse_child("Rotation", "number")?,
    };

    Ok(RawBone {
        bone,
        parent: node.parse_child("ParentIndex", "integer")?,
        texture: node.parse_child("TextureIndex", "integer")?,
    })
}

fn check_bone_counts(keyframes: &[Keyframe]) -> Result<(), SchemaError> {
    let Some(first) = keyframes.first() else {
        return Ok(());
    };
    let expected = first.bones.len();

    match keyframes
        .iter()
        .enumerate()
        .find(|(_, k)| k.bones.len() != expected)
    {
        Some((keyframe, k)) => Err(SchemaError::BoneCountMismatch {
            keyframe,
            expected,
            found: k.bones.len(),
        }),
        None => Ok(()),
    }
}

/// Reject parent chains that loop back on themselves.
///
/// Forward references (a parent declared after its child) are allowed.
fn check_acyclic(keyframe: usize, bones: &[Bone]) -> Result<(), SchemaError> {
    const UNVISITED: u8 = 0;
    const ON_CHAIN: u8 = 1;
    const REACHES_ROOT: u8 = 2;

    let mut state = vec![UNVISITED; bones.len()];
    let mut chain = Vec::new();

    for start in 0..bones.len() {
        let mut current = Some(start);
        while let Some(index) = current {
            match state[index] {
                REACHES_ROOT => break,
                ON_CHAIN => return Err(SchemaError::CyclicParent { keyframe, bone: index }),
                _ => {
                    state[index] = ON_CHAIN;
                    chain.push(index);
                    current = bones[index].parent_index;
                }
            }
        }
        for index in chain.drain(..) {
            state[index] = REACHES_ROOT;
        }
    }

    Ok(())
}
