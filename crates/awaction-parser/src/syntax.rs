//! Syntax tree produced by the grammar.
//!
//! Nodes borrow their text from the cleaned action string. They keep the
//! matched text verbatim; every conversion to typed values happens in
//! [`interpret`](crate::interpret).

use awaction_core::{command::CommandKind, trigger::Trigger};

/// One `trigger command, command, ...` clause.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ActionNode<'s> {
    pub trigger: Trigger,
    pub commands: Vec<CommandNode<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CommandNode<'s> {
    /// A command keyword followed by zero or more arguments.
    Arguments {
        kind: CommandKind,
        arguments: Vec<Argument<'s>>,
    },
    Examine,
    Animate(AnimateNode<'s>),
    Teleport {
        world: Option<&'s str>,
        location: Option<LocationNode<'s>>,
    },
    Warp(LocationNode<'s>),
    /// Text that matched no command grammar.
    Invalid(&'s str),
}

/// A single command argument, tagged by the production that matched it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Argument<'s> {
    /// `name=<object>` or a bare object name.
    TargetName(&'s str),
    /// `key=value`, with the key as written.
    Parameter {
        key: &'s str,
        value: ParameterValue<'s>,
    },
    /// One of `on`, `true`, `yes`, `off`, `false`, `no`.
    Boolean(&'s str),
    /// A flag keyword or its negated `no` form.
    Status { flag: Flag, keyword: &'s str },
    Resource(&'s str),
    Color(&'s str),
    /// One or more signed numbers.
    Components {
        production: Components,
        values: Vec<&'s str>,
    },
    /// A single unsigned number in `0..=1` after clamping.
    Scalar { production: Scalar, value: &'s str },
    Text(&'s str),
    Sequence(&'s str),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParameterValue<'s> {
    Integer(&'s str),
    Float(&'s str),
    Color(&'s str),
    /// A keyword value, compared and stored lowercased.
    Keyword(&'s str),
    /// Free text stored as written.
    Raw(&'s str),
}

/// Status flags and their keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Flag {
    Mask,
    Loop,
    Sync,
    Reset,
    Overlap,
}

impl Flag {
    /// Field the flag is stored under.
    pub fn field(self) -> &'static str {
        match self {
            Flag::Mask => "maskStatus",
            _ => self.positive(),
        }
    }

    pub fn positive(self) -> &'static str {
        match self {
            Flag::Mask => "mask",
            Flag::Loop => "loop",
            Flag::Sync => "sync",
            Flag::Reset => "reset",
            Flag::Overlap => "overlap",
        }
    }

    /// The keyword that switches the flag off, if the flag has one.
    pub fn negative(self) -> Option<&'static str> {
        match self {
            Flag::Mask => Some("nomask"),
            Flag::Loop => Some("noloop"),
            Flag::Sync => Some("nosync"),
            Flag::Reset => Some("noreset"),
            Flag::Overlap => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Components {
    /// `move` distances.
    Distance,
    /// `rotate` speeds.
    Speed,
    /// `scale` factors.
    Factor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scalar {
    /// `opacity` value.
    Opacity,
    /// `ambient`, `diffuse` and `specular` intensity.
    Intensity,
}

/// `animate <object> <texture> [counts...] [frames...]`, with `tag=N` and
/// `mask`/`nomask` accepted anywhere among the arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnimateNode<'s> {
    /// `tag=` parameters and mask statuses in source order.
    pub options: Vec<Argument<'s>>,
    pub object: &'s str,
    pub texture: &'s str,
    pub image_count: Option<&'s str>,
    pub frame_count: Option<&'s str>,
    pub frame_delay: Option<&'s str>,
    pub frames: Vec<&'s str>,
}

/// A teleport or warp destination.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocationNode<'s> {
    pub position: PositionNode<'s>,
    /// Signed or unsigned number as written, without the trailing `a`.
    pub altitude: Option<&'s str>,
    pub direction: Option<&'s str>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PositionNode<'s> {
    /// `12.5N 3W`: magnitudes with hemisphere letters.
    Absolute {
        north: (&'s str, char),
        east: (&'s str, char),
    },
    /// `+1 -2`: offsets from the current position.
    Relative { x: &'s str, y: &'s str },
}
