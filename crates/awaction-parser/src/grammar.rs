//! PEG grammar for action strings.
//!
//! The grammar is a set of winnow parsers over a [`Stateful`] input whose
//! state records the furthest failure position, so that a rejected action
//! string can be reported with everything the grammar would have accepted
//! there.
//!
//! ```text
//! Actions  = ListOf<Action, ";"+> ";"? end
//! Action   = Trigger ListOf<Command, ","+> ","?
//! Command  = TextureCommand | AnimateCommand | ... | UrlCommand | invalid
//! ```
//!
//! Rules follow two conventions:
//!
//! - **Syntactic** rules (actions, commands, argument lists, coordinates)
//!   skip whitespace before each element.
//! - **Lexical** rules (names, numbers, resource paths, `key=value`
//!   parameters) match contiguous text only.
//!
//! Keywords are matched case-insensitively and without a word boundary, so
//! `createtexture foo` reads as the `create` trigger followed by a `texture`
//! command. Boolean and status keywords are case-sensitive.

use std::{
    cell::{Cell, RefCell},
    fmt,
};

use winnow::{
    Parser,
    ascii::Caseless,
    combinator::{alt, opt},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stateful, Stream},
    token::{literal, one_of, take_while},
};

use awaction_core::{command::CommandKind, trigger::Trigger};

use crate::{
    error::Expected,
    syntax::{
        ActionNode, AnimateNode, Argument, CommandNode, Components, Flag, LocationNode,
        ParameterValue, PositionNode, Scalar,
    },
};

pub(crate) type Input<'s, 't> = Stateful<LocatingSlice<&'s str>, &'t MatchState<'t>>;
type PError = ErrMode<ContextError>;
type IResult<O> = ModalResult<O>;

type ArgumentRule = for<'s, 't> fn(&mut Input<'s, 't>) -> IResult<Argument<'s>>;
type CommandRule = for<'s, 't> fn(&mut Input<'s, 't>) -> IResult<CommandNode<'s>>;

/// How a command is matched once its alternative is tried.
#[derive(Clone, Copy)]
enum Production {
    /// The command keyword followed by any number of arguments.
    Arguments(ArgumentRule),
    /// A command with its own fixed shape.
    Command(CommandRule),
}

struct CommandGrammar {
    kind: CommandKind,
    production: Production,
}

/// The compiled action string grammar.
///
/// Built once and shared immutably; every match allocates its own
/// [`MatchState`].
pub(crate) struct Grammar {
    commands: Vec<CommandGrammar>,
}

/// Position and expectations of the furthest failed match.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Failure {
    pub offset: usize,
    pub expected: Vec<Expected>,
}

/// Per-match state threaded through the input.
#[derive(Debug)]
pub(crate) struct MatchState<'g> {
    grammar: &'g Grammar,
    furthest: RefCell<Failure>,
    /// Nesting depth of negative lookaheads; failures inside them are not
    /// recorded.
    muted: Cell<u32>,
}

impl Grammar {
    pub fn new() -> Self {
        let commands = CommandKind::RECOGNIZED
            .into_iter()
            .chain([CommandKind::Invalid])
            .map(|kind| CommandGrammar {
                kind,
                production: production(kind),
            })
            .collect();
        Self { commands }
    }

    /// Match `source` against the whole grammar.
    ///
    /// # Errors
    ///
    /// Returns the furthest [`Failure`] when `source` is not an action string.
    pub fn parse<'s>(&self, source: &'s str) -> Result<Vec<ActionNode<'s>>, Failure> {
        let state = MatchState {
            grammar: self,
            furthest: RefCell::default(),
            muted: Cell::new(0),
        };
        let mut input = Stateful {
            input: LocatingSlice::new(source),
            state: &state,
        };
        match actions(&mut input) {
            Ok(actions) => Ok(actions),
            Err(_) => Err(state.furthest.into_inner()),
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.commands.iter().map(|command| command.kind))
            .finish()
    }
}

impl MatchState<'_> {
    fn record(&self, offset: usize, expected: Expected) {
        if self.muted.get() > 0 {
            return;
        }
        let mut furthest = self.furthest.borrow_mut();
        if offset > furthest.offset {
            furthest.offset = offset;
            furthest.expected.clear();
        }
        if offset == furthest.offset {
            furthest.expected.push(expected);
        }
    }
}

fn production(kind: CommandKind) -> Production {
    match kind {
        CommandKind::Texture => Production::Arguments(texture_argument),
        CommandKind::Animate => Production::Command(animate_command),
        CommandKind::Sound => Production::Arguments(sound_argument),
        CommandKind::Corona => Production::Arguments(corona_argument),
        CommandKind::Color => Production::Arguments(color_argument),
        CommandKind::Examine => Production::Command(examine_command),
        CommandKind::Solid | CommandKind::Visible => Production::Arguments(switch_argument),
        CommandKind::Name => Production::Arguments(name_argument),
        CommandKind::Move => Production::Arguments(move_argument),
        CommandKind::Rotate => Production::Arguments(rotate_argument),
        CommandKind::Scale => Production::Arguments(scale_argument),
        CommandKind::Light => Production::Arguments(light_argument),
        CommandKind::Noise => Production::Arguments(noise_argument),
        CommandKind::Opacity => Production::Arguments(opacity_argument),
        CommandKind::Ambient | CommandKind::Diffuse | CommandKind::Specular => {
            Production::Arguments(intensity_argument)
        }
        CommandKind::Picture => Production::Arguments(picture_argument),
        CommandKind::Media => Production::Arguments(media_argument),
        CommandKind::Say => Production::Arguments(say_argument),
        CommandKind::Seq => Production::Arguments(seq_argument),
        CommandKind::Sign => Production::Arguments(sign_argument),
        CommandKind::Teleport => Production::Command(teleport_command),
        CommandKind::Warp => Production::Command(warp_command),
        CommandKind::Url => Production::Arguments(url_argument),
        CommandKind::Invalid => Production::Command(invalid_command),
    }
}

fn backtrack() -> PError {
    ErrMode::Backtrack(ContextError::new())
}

fn offset(input: &Input<'_, '_>) -> usize {
    input.input.current_token_start()
}

/// Run `parser`, recording `expected` at the start position if it fails.
fn expect<'s, 't, O>(
    expected: Expected,
    mut parser: impl Parser<Input<'s, 't>, O, PError>,
) -> impl Parser<Input<'s, 't>, O, PError> {
    move |input: &mut Input<'s, 't>| {
        let start = offset(input);
        let result = parser.parse_next(input);
        if result.is_err() {
            input.state.record(start, expected);
        }
        result
    }
}

/// Case-sensitive literal.
fn symbol<'s, 't>(text: &'static str) -> impl Parser<Input<'s, 't>, &'s str, PError> {
    expect(Expected::Literal(text), literal(text))
}

/// Case-insensitive literal.
fn keyword<'s, 't>(word: &'static str) -> impl Parser<Input<'s, 't>, &'s str, PError> {
    expect(Expected::Literal(word), literal(Caseless(word)))
}

/// One or more characters accepted by `accept`.
fn chars<'s, 't>(
    class: &'static str,
    accept: fn(char) -> bool,
) -> impl Parser<Input<'s, 't>, &'s str, PError> {
    expect(Expected::Class(class), take_while(1.., accept))
}

/// Negative lookahead: succeeds without consuming when `parser` fails.
fn not_ahead<'s, 't, O>(
    mut parser: impl Parser<Input<'s, 't>, O, PError>,
) -> impl Parser<Input<'s, 't>, (), PError> {
    move |input: &mut Input<'s, 't>| {
        let checkpoint = input.checkpoint();
        let state = input.state;
        state.muted.set(state.muted.get() + 1);
        let matched = parser.parse_next(input).is_ok();
        state.muted.set(state.muted.get() - 1);
        input.reset(&checkpoint);
        if matched { Err(backtrack()) } else { Ok(()) }
    }
}

fn spaces(input: &mut Input<'_, '_>) -> IResult<()> {
    take_while(0.., |c: char| c <= ' ')
        .void()
        .parse_next(input)
}

/// Syntactic `X?`: skip spaces, then try `parser`, restoring the input when
/// it backtracks.
fn spaced_opt<'s, 't, O>(
    input: &mut Input<'s, 't>,
    mut parser: impl Parser<Input<'s, 't>, O, PError>,
) -> IResult<Option<O>> {
    let checkpoint = input.checkpoint();
    spaces(input)?;
    match parser.parse_next(input) {
        Ok(output) => Ok(Some(output)),
        Err(ErrMode::Backtrack(_)) => {
            input.reset(&checkpoint);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Syntactic `X*`. `parser` must consume input whenever it succeeds.
fn spaced_many<'s, 't, O>(
    input: &mut Input<'s, 't>,
    mut parser: impl Parser<Input<'s, 't>, O, PError>,
) -> IResult<Vec<O>> {
    let mut items = Vec::new();
    while let Some(item) = spaced_opt(input, parser.by_ref())? {
        items.push(item);
    }
    Ok(items)
}

/// Syntactic `ListOf<X, separator+>`: `X (separator+ X)*`, or nothing.
fn list_of<'s, 't, O>(
    input: &mut Input<'s, 't>,
    separator: &'static str,
    mut element: impl Parser<Input<'s, 't>, O, PError>,
) -> IResult<Vec<O>> {
    let mut items = Vec::new();
    let Some(first) = spaced_opt(input, element.by_ref())? else {
        return Ok(items);
    };
    items.push(first);

    loop {
        let checkpoint = input.checkpoint();
        match separators(input, separator) {
            Ok(()) => {}
            Err(ErrMode::Backtrack(_)) => {
                input.reset(&checkpoint);
                break;
            }
            Err(err) => return Err(err),
        }
        match spaced_opt(input, element.by_ref())? {
            Some(item) => items.push(item),
            None => {
                input.reset(&checkpoint);
                break;
            }
        }
    }
    Ok(items)
}

/// `separator+`, with spaces allowed around each one.
fn separators(input: &mut Input<'_, '_>, separator: &'static str) -> IResult<()> {
    spaces(input)?;
    symbol(separator).parse_next(input)?;
    while spaced_opt(input, symbol(separator))?.is_some() {}
    Ok(())
}

fn end_of_input(input: &mut Input<'_, '_>) -> IResult<()> {
    if input.eof_offset() == 0 {
        Ok(())
    } else {
        input.state.record(offset(input), Expected::EndOfInput);
        Err(backtrack())
    }
}

fn is_alphanumeric(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

fn is_object_char(c: char) -> bool {
    is_alphanumeric(c) || matches!(c, '_' | '-')
}

fn is_basic_resource_char(c: char) -> bool {
    is_alphanumeric(c) || matches!(c, '.' | '_' | '-')
}

fn is_resource_char(c: char) -> bool {
    is_alphanumeric(c)
        || matches!(
            c,
            '.' | '/'
                | ':'
                | '_'
                | '-'
                | '+'
                | '%'
                | '?'
                | '='
                | '['
                | ']'
                | '&'
                | '~'
                | '!'
                | '@'
                | '*'
                | '('
                | ')'
        )
}

fn object_name<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("an object name", is_object_char).parse_next(input)
}

fn resource_target<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("a resource path", is_resource_char).parse_next(input)
}

fn basic_resource_target<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("a file name", is_basic_resource_char).parse_next(input)
}

fn color_code<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("a color", is_alphanumeric).parse_next(input)
}

fn positive_integer<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("a digit", |c| c.is_ascii_digit()).parse_next(input)
}

fn sign(input: &mut Input<'_, '_>) -> IResult<char> {
    expect(Expected::Class("a sign"), one_of(['+', '-'])).parse_next(input)
}

/// `digit* "." digit+ | digit+`
fn float<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    alt((
        (
            take_while(0.., |c: char| c.is_ascii_digit()),
            symbol("."),
            positive_integer,
        )
            .take(),
        positive_integer,
    ))
    .parse_next(input)
}

fn signed_float<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    (opt(sign), float).take().parse_next(input)
}

fn force_signed_float<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    (sign, float).take().parse_next(input)
}

fn boolean<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    alt((
        symbol("on"),
        symbol("true"),
        symbol("yes"),
        symbol("off"),
        symbol("false"),
        symbol("no"),
    ))
    .parse_next(input)
}

/// Text after `say` or a sign: a double-quoted string whose closing quote
/// may be missing, or a run without spaces and delimiters.
fn text<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    alt((quoted_text, unquoted_text)).parse_next(input)
}

fn quoted_text<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    symbol("\"").parse_next(input)?;
    let text = take_while(0.., |c: char| c != '"').parse_next(input)?;
    opt(symbol("\"")).parse_next(input)?;
    Ok(text)
}

fn unquoted_text<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    chars("text", |c| !matches!(c, ';' | ',' | ' ')).parse_next(input)
}

fn status<'s, 't>(flag: Flag) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    move |input: &mut Input<'s, 't>| {
        let keyword = match flag.negative() {
            Some(negative) => alt((symbol(flag.positive()), symbol(negative))).parse_next(input)?,
            None => symbol(flag.positive()).parse_next(input)?,
        };
        Ok(Argument::Status { flag, keyword })
    }
}

fn parameter<'s, 't>(
    key: impl Parser<Input<'s, 't>, &'s str, PError>,
    value: impl Parser<Input<'s, 't>, &'s str, PError>,
    wrap: fn(&'s str) -> ParameterValue<'s>,
) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    (key, symbol("="), value).map(move |(key, _, value)| Argument::Parameter {
        key,
        value: wrap(value),
    })
}

fn integer_parameter<'s, 't>(
    key: impl Parser<Input<'s, 't>, &'s str, PError>,
) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    parameter(key, positive_integer, ParameterValue::Integer)
}

fn float_parameter<'s, 't>(
    key: impl Parser<Input<'s, 't>, &'s str, PError>,
) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    parameter(key, float, ParameterValue::Float)
}

fn color_parameter<'s, 't>(
    key: impl Parser<Input<'s, 't>, &'s str, PError>,
) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    parameter(key, color_code, ParameterValue::Color)
}

fn name_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    (symbol("name"), symbol("="), object_name)
        .map(|(_, _, name)| Argument::TargetName(name))
        .parse_next(input)
}

fn tag_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    integer_parameter(symbol("tag")).parse_next(input)
}

/// `mask=<resource>`; the value is kept as written.
fn mask_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    parameter(keyword("mask"), resource_target, ParameterValue::Raw).parse_next(input)
}

fn time_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    float_parameter(symbol("time")).parse_next(input)
}

fn wait_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    float_parameter(symbol("wait")).parse_next(input)
}

fn radius_parameter<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    float_parameter(keyword("radius")).parse_next(input)
}

fn light_type<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    alt((keyword("point"), keyword("spot"))).parse_next(input)
}

fn light_effect<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    alt((
        keyword("blink"),
        keyword("fadein"),
        keyword("fadeout"),
        keyword("fire"),
        keyword("flicker"),
        keyword("flash"),
        keyword("pulse"),
    ))
    .parse_next(input)
}

fn resource<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    resource_target.map(Argument::Resource).parse_next(input)
}

fn target_name<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    object_name.map(Argument::TargetName).parse_next(input)
}

fn components<'s, 't>(production: Components) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    move |input: &mut Input<'s, 't>| {
        let mut values = vec![signed_float(input)?];
        values.extend(spaced_many(input, signed_float)?);
        Ok(Argument::Components { production, values })
    }
}

fn scalar<'s, 't>(production: Scalar) -> impl Parser<Input<'s, 't>, Argument<'s>, PError> {
    signed_float.map(move |value| Argument::Scalar { production, value })
}

fn texture_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((mask_parameter, tag_parameter, name_parameter, resource)).parse_next(input)
}

fn sound_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((name_parameter, status(Flag::Loop), resource)).parse_next(input)
}

fn corona_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        mask_parameter,
        float_parameter(symbol("size")),
        name_parameter,
        resource,
    ))
    .parse_next(input)
}

fn color_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((name_parameter, color_code.map(Argument::Color))).parse_next(input)
}

/// `solid` and `visible`: a boolean or the targeted object.
fn switch_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((boolean.map(Argument::Boolean), target_name)).parse_next(input)
}

fn name_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    target_name(input)
}

fn move_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        components(Components::Distance),
        status(Flag::Loop),
        status(Flag::Sync),
        status(Flag::Reset),
        name_parameter,
        time_parameter,
        wait_parameter,
    ))
    .parse_next(input)
}

fn rotate_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        components(Components::Speed),
        status(Flag::Sync),
        time_parameter,
        status(Flag::Loop),
        status(Flag::Reset),
        wait_parameter,
        name_parameter,
    ))
    .parse_next(input)
}

fn scale_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        components(Components::Factor),
        status(Flag::Sync),
        time_parameter,
        status(Flag::Loop),
        status(Flag::Reset),
        wait_parameter,
        name_parameter,
    ))
    .parse_next(input)
}

fn light_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        parameter(keyword("type"), light_type, ParameterValue::Keyword),
        color_parameter(keyword("color")),
        float_parameter(keyword("brightness")),
        radius_parameter,
        name_parameter,
        parameter(keyword("fx"), light_effect, ParameterValue::Keyword),
        time_parameter,
        float_parameter(symbol("angle")),
        float_parameter(symbol("pitch")),
    ))
    .parse_next(input)
}

fn noise_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((status(Flag::Overlap), resource)).parse_next(input)
}

fn opacity_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((scalar(Scalar::Opacity), tag_parameter, name_parameter)).parse_next(input)
}

/// `ambient`, `diffuse` and `specular`.
fn intensity_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((scalar(Scalar::Intensity), tag_parameter, name_parameter)).parse_next(input)
}

fn picture_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        integer_parameter(symbol("update")),
        name_parameter,
        resource,
    ))
    .parse_next(input)
}

fn media_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((name_parameter, radius_parameter, resource)).parse_next(input)
}

fn say_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    text.map(Argument::Text).parse_next(input)
}

/// `loop`/`noloop` only count as a whole word; `loopy` is a sequence name.
fn seq_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        name_parameter,
        (status(Flag::Loop), not_ahead(one_of(is_basic_resource_char)))
            .map(|(status, ())| status),
        basic_resource_target.map(Argument::Sequence),
    ))
    .parse_next(input)
}

fn sign_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        color_parameter(keyword("color")),
        color_parameter(keyword("bcolor")),
        name_parameter,
        text.map(Argument::Text),
    ))
    .parse_next(input)
}

fn url_argument<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        parameter(keyword("target"), keyword("aw_3d"), ParameterValue::Keyword),
        resource,
    ))
    .parse_next(input)
}

fn arguments_command<'s>(
    input: &mut Input<'s, '_>,
    kind: CommandKind,
    argument: ArgumentRule,
) -> IResult<CommandNode<'s>> {
    keyword(kind.as_str()).parse_next(input)?;
    let arguments = spaced_many(input, argument)?;
    Ok(CommandNode::Arguments { kind, arguments })
}

fn examine_command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    keyword("examine")
        .map(|_| CommandNode::Examine)
        .parse_next(input)
}

/// `animate <object> <texture> [image [frames [delay [frame...]]]]`
///
/// `tag=N` and `mask`/`nomask` may appear before, between or after the
/// positional arguments.
fn animate_command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    keyword("animate").parse_next(input)?;

    let mut options = Vec::new();
    let mut object = None;
    let mut texture = None;
    let mut numbers = Vec::new();
    loop {
        if let Some(option) = spaced_opt(input, animate_option)? {
            options.push(option);
        } else if object.is_none() {
            match spaced_opt(input, object_name)? {
                Some(name) => object = Some(name),
                None => break,
            }
        } else if texture.is_none() {
            match spaced_opt(input, basic_resource_target)? {
                Some(name) => texture = Some(name),
                None => break,
            }
        } else if let Some(number) = spaced_opt(input, positive_integer)? {
            numbers.push(number);
        } else {
            break;
        }
    }
    let (Some(object), Some(texture)) = (object, texture) else {
        return Err(backtrack());
    };

    let mut numbers = numbers.into_iter();
    Ok(CommandNode::Animate(AnimateNode {
        options,
        object,
        texture,
        image_count: numbers.next(),
        frame_count: numbers.next(),
        frame_delay: numbers.next(),
        frames: numbers.collect(),
    }))
}

/// `tag=N`, or `mask`/`nomask` as a whole word.
fn animate_option<'s>(input: &mut Input<'s, '_>) -> IResult<Argument<'s>> {
    alt((
        tag_parameter,
        (status(Flag::Mask), not_ahead(one_of(is_basic_resource_char)))
            .map(|(status, ())| status),
    ))
    .parse_next(input)
}

/// `teleport [world] [coordinates]`
fn teleport_command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    keyword("teleport").parse_next(input)?;
    let world = spaced_opt(input, world_name)?;
    let location = spaced_opt(input, location)?;
    Ok(CommandNode::Teleport { world, location })
}

fn warp_command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    keyword("warp").parse_next(input)?;
    spaces(input)?;
    location.map(CommandNode::Warp).parse_next(input)
}

/// Any text up to the next delimiter, possibly empty.
fn invalid_command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    take_while(0.., |c: char| c != ';' && c != ',')
        .map(CommandNode::Invalid)
        .parse_next(input)
}

/// A world name may not start with a digit or a signed number, so that
/// coordinates are never read as a world.
fn world_name<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    not_ahead(one_of(|c: char| c.is_ascii_digit())).parse_next(input)?;
    not_ahead(force_signed_float).parse_next(input)?;
    chars("a world name", |c| !matches!(c, ';' | ',' | ' ' | '"')).parse_next(input)
}

/// Coordinates, then an optional altitude and direction.
fn location<'s>(input: &mut Input<'s, '_>) -> IResult<LocationNode<'s>> {
    let position = alt((absolute_position, relative_position)).parse_next(input)?;
    let altitude = spaced_opt(input, altitude)?;
    let direction = spaced_opt(input, positive_integer)?;
    Ok(LocationNode {
        position,
        altitude,
        direction,
    })
}

fn absolute_position<'s>(input: &mut Input<'s, '_>) -> IResult<PositionNode<'s>> {
    let north = (float, hemisphere("N or S", ['n', 'N', 's', 'S'])).parse_next(input)?;
    spaces(input)?;
    let east = (float, hemisphere("E or W", ['e', 'E', 'w', 'W'])).parse_next(input)?;
    Ok(PositionNode::Absolute { north, east })
}

fn hemisphere<'s, 't>(
    class: &'static str,
    letters: [char; 4],
) -> impl Parser<Input<'s, 't>, char, PError> {
    expect(Expected::Class(class), one_of(letters))
}

fn relative_position<'s>(input: &mut Input<'s, '_>) -> IResult<PositionNode<'s>> {
    let x = force_signed_float(input)?;
    spaces(input)?;
    let y = force_signed_float(input)?;
    Ok(PositionNode::Relative { x, y })
}

/// `[+|-]<float>a`; the returned text excludes the `a`.
fn altitude<'s>(input: &mut Input<'s, '_>) -> IResult<&'s str> {
    let value = signed_float(input)?;
    keyword("a").parse_next(input)?;
    Ok(value)
}

fn actions<'s>(input: &mut Input<'s, '_>) -> IResult<Vec<ActionNode<'s>>> {
    let actions = list_of(input, ";", action)?;
    spaced_opt(input, symbol(";"))?;
    spaces(input)?;
    end_of_input(input)?;
    Ok(actions)
}

fn action<'s>(input: &mut Input<'s, '_>) -> IResult<ActionNode<'s>> {
    let trigger = trigger(input)?;
    let commands = list_of(input, ",", command)?;
    spaced_opt(input, symbol(","))?;
    Ok(ActionNode { trigger, commands })
}

fn trigger(input: &mut Input<'_, '_>) -> IResult<Trigger> {
    for trigger in Trigger::ALL {
        if keyword(trigger.as_str()).parse_next(input).is_ok() {
            return Ok(trigger);
        }
    }
    Err(backtrack())
}

/// Ordered choice over every command grammar. The final alternative
/// accepts any text, so a command never fails to match.
fn command<'s>(input: &mut Input<'s, '_>) -> IResult<CommandNode<'s>> {
    let grammar = input.state.grammar;
    for command in &grammar.commands {
        let checkpoint = input.checkpoint();
        let result = match command.production {
            Production::Arguments(argument) => arguments_command(input, command.kind, argument),
            Production::Command(parse) => parse(input),
        };
        match result {
            Ok(node) => return Ok(node),
            Err(ErrMode::Backtrack(_)) => input.reset(&checkpoint),
            Err(err) => return Err(err),
        }
    }
    Err(backtrack())
}
