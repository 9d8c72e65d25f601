//! Semantic interpretation of syntax nodes.
//!
//! Every argument production converts to one `(field, value)` pair; the
//! fixed-shape commands (`animate`, `teleport`, `warp`) convert straight to
//! a [`Command`].

use awaction_core::{
    color::Rgb,
    command::{Command, CommandKind, TARGET_NAME, Value},
    error::CoreError,
    geometry::WorldCoordinates,
};

use crate::{
    coerce,
    syntax::{
        AnimateNode, Argument, Components, Flag, LocationNode, ParameterValue, PositionNode,
        Scalar,
    },
};

/// Field a bare resource path is stored under before the resolver renames it
/// after its command.
pub(crate) const RESOURCE: &str = "resource";

/// Convert one argument to its field and value.
///
/// Returns `None` for an argument that carries no value, such as a boolean
/// keyword outside the recognized set.
pub(crate) fn argument(argument: Argument<'_>) -> Option<(String, Value)> {
    let pair: (String, Value) = match argument {
        Argument::TargetName(name) => (TARGET_NAME.to_string(), name.to_lowercase().into()),
        Argument::Parameter { key, value } => (key.to_lowercase(), parameter_value(value)),
        Argument::Boolean(keyword) => ("value".to_string(), coerce::boolean(keyword)?.into()),
        Argument::Status { flag, keyword } => (
            flag.field().to_string(),
            (keyword == flag.positive()).into(),
        ),
        Argument::Resource(path) => (RESOURCE.to_string(), path.into()),
        Argument::Color(token) => ("color".to_string(), Rgb::resolve(token).into()),
        Argument::Components { production, values } => {
            let values: Vec<f64> = values.into_iter().map(coerce::float).collect();
            match production {
                Components::Distance => {
                    ("distance".to_string(), coerce::complete_vector(&values).into())
                }
                Components::Speed => ("speed".to_string(), coerce::complete_vector(&values).into()),
                Components::Factor => ("factor".to_string(), coerce::complete_scale(&values).into()),
            }
        }
        Argument::Scalar { production, value } => {
            let field = match production {
                Scalar::Opacity => "value",
                Scalar::Intensity => "intensity",
            };
            (
                field.to_string(),
                coerce::unit_interval(coerce::float(value)).into(),
            )
        }
        Argument::Text(text) => ("text".to_string(), text.into()),
        Argument::Sequence(name) => ("seq".to_string(), name.into()),
    };
    Some(pair)
}

fn parameter_value(value: ParameterValue<'_>) -> Value {
    match value {
        ParameterValue::Integer(digits) => coerce::unsigned(digits).into(),
        ParameterValue::Float(number) => coerce::float(number).into(),
        ParameterValue::Color(token) => Rgb::resolve(token).into(),
        ParameterValue::Keyword(keyword) => keyword.to_lowercase().into(),
        ParameterValue::Raw(text) => text.into(),
    }
}

/// Build an `animate` command.
///
/// # Errors
///
/// Returns [`CoreError::DuplicateField`] when `tag` or the mask status is
/// given twice.
pub(crate) fn animate(node: AnimateNode<'_>) -> Result<Command, CoreError> {
    let mut command = Command::new(CommandKind::Animate);
    for (field, value) in node.options.into_iter().filter_map(argument) {
        command.set(field, value)?;
    }
    let mask_status = Flag::Mask.field();
    if !command.contains(mask_status) {
        command.set(mask_status, false)?;
    }

    command.set(TARGET_NAME, node.object.to_lowercase())?;
    command.set("texture", node.texture)?;
    command.set("imageCount", node.image_count.map_or(1, coerce::unsigned))?;
    command.set("frameCount", node.frame_count.map_or(1, coerce::unsigned))?;
    command.set("frameDelay", node.frame_delay.map_or(0, coerce::unsigned))?;
    if !node.frames.is_empty() {
        let frames: Vec<u64> = node.frames.into_iter().map(coerce::unsigned).collect();
        command.set("frameList", frames)?;
    }
    Ok(command)
}

pub(crate) fn teleport(world: Option<&str>, location: Option<LocationNode<'_>>) -> Command {
    let mut command = Command::new(CommandKind::Teleport);
    if let Some(world) = world {
        command = command.with("worldName", world);
    }
    match location {
        Some(location) => with_location(command, location),
        None => command,
    }
}

pub(crate) fn warp(location: LocationNode<'_>) -> Command {
    with_location(Command::new(CommandKind::Warp), location)
}

fn with_location(command: Command, location: LocationNode<'_>) -> Command {
    let mut command = command.with("coordinates", position(location.position));
    if let Some(altitude) = location.altitude {
        command = command.with("altitude", coerce::altitude(altitude));
    }
    if let Some(direction) = location.direction {
        command = command.with("direction", coerce::unsigned(direction));
    }
    command
}

fn position(position: PositionNode<'_>) -> WorldCoordinates {
    match position {
        PositionNode::Absolute { north, east } => coerce::absolute_coordinates(north, east),
        PositionNode::Relative { x, y } => coerce::relative_coordinates(x, y),
    }
}
