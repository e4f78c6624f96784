//! This crate implements a minimal command line option parser.  It's dead
//! simple, dependency free and parses the command line up front into an
//! ordered collection that you query by name afterwards.
//!
//! The goal of this crate is that it's small, predictable and requires
//! little maintenance.  It does one thing: turn a raw argument vector into
//! options you can look up.
//!
//! # Example
//!
//! Most programs only need [`parse`] and the lookups on [`ParsedOptions`]:
//!
//! ```
//! use optbag_parser::{parse, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let parsed = parse(["prog", "--level=3", "-v"].into_iter())?;
//!
//!     assert_eq!(parsed.find_long("level").and_then(|opt| opt.value()), Some("3"));
//!     assert!(parsed.find_short('v').is_some());
//!     assert!(parsed.find_long("missing").is_none());
//!
//!     Ok(())
//! }
//! ```
//!
//! Here is what's happening:
//!
//! * [`parse`] consumes a full command line (the first element is the
//!   program name and is skipped) and collects every option into a
//!   [`ParsedOptions`] in the order supplied.
//! * [`ParsedOptions::find_long`] and [`ParsedOptions::find_short`] return
//!   the first matching option, or `None` if it never appeared.  A present
//!   option may still carry no value; [`Opt::value`] tells the two apart.
//!
//! Programs that want to step through the command line themselves drive a
//! [`Parser`] directly with [`Parser::next_opt`].
//!
//! # Behavior
//!
//! Four argument shapes are recognized: `--name` introduces a long option,
//! `-n` a short option, `--` ends option parsing, and everything else is a
//! value.  A value belongs to the option right before it, either embedded
//! (`--name=value`, `-nvalue`) or as the following argument.  The following
//! argument is taken with a single token of lookahead, if and only if it
//! does not itself look like an option or the terminator.
//!
//! A short option name is a single character, so `-nvalue` binds as the
//! name `n` with the value `value`.  There is no grouping of several flags
//! into one argument.  A lone `-` counts as a value where a value may
//! attach, and is an error where an option name is expected.
//!
//! Arguments after `--` are never examined.  They stay on the parser and
//! can be collected with [`Parser::raw_arg`].
//!
//! Values are plain text.  The parser does not coerce types, does not check
//! names against a declared set and does not generate help output.
//!
//! # Limits and Error Handling
//!
//! The number of options one parse may collect is bounded.  The bound
//! defaults to [`DEFAULT_OPT_LIMIT`] and can be chosen per parse; exceeding
//! it is an error, never a silent truncation.
//!
//! Every parse error is fatal to the invocation: the typed [`Error`] is
//! returned to the caller and no partial result is handed out.  The library
//! itself never prints and never terminates the process; whether to abort
//! is the embedding program's call.  Lookups on a parsed result never fail,
//! a missing option is an ordinary `None`.
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::iter::once;
use std::mem::replace;
use std::path::Path;

/// The default limit on the number of options a single parse may hold.
pub const DEFAULT_OPT_LIMIT: usize = 128;

pub struct Error {
    repr: Box<ErrorRepr>,
}

impl Error {
    fn new(kind: ErrorKind) -> Error {
        Error {
            repr: Box::new(ErrorRepr {
                kind,
                value: None,
                limit: None,
            }),
        }
    }

    fn with_value(mut self, value: ErrorValue) -> Error {
        self.repr.value = Some(value);
        self
    }

    fn with_limit(mut self, limit: usize) -> Error {
        self.repr.limit = Some(limit);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.repr.kind
    }

    /// The token the error is about, if there was one and it's valid unicode.
    pub fn value(&self) -> Option<&str> {
        match self.repr.value.as_ref()? {
            ErrorValue::String(s) => Some(s),
            ErrorValue::OsString(s) => s.to_str(),
        }
    }

    /// The raw token the error is about, if there was one.
    pub fn raw_value(&self) -> Option<&OsStr> {
        match self.repr.value.as_ref()? {
            ErrorValue::String(s) => Some(OsStr::new(s)),
            ErrorValue::OsString(s) => Some(s),
        }
    }

    /// The option limit that was exceeded, for [`ErrorKind::CapacityExceeded`].
    pub fn limit(&self) -> Option<usize> {
        self.repr.limit
    }
}

impl<'s> From<&'s str> for Error {
    fn from(message: &'s str) -> Error {
        Error::from(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Error {
        Error {
            repr: Box::new(ErrorRepr {
                kind: ErrorKind::Custom,
                value: Some(ErrorValue::String(message)),
                limit: None,
            }),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.value()) {
            (ErrorKind::MissingShortName, _) => {
                write!(f, "missing character for short option")
            }
            (ErrorKind::UnexpectedValue, Some(x)) => write!(f, "unexpected value {:?}", x),
            (ErrorKind::UnexpectedValue, None) => write!(f, "unexpected value"),
            (ErrorKind::CapacityExceeded, _) => match self.limit() {
                Some(limit) => write!(f, "too many options (limit is {})", limit),
                None => write!(f, "too many options"),
            },
            (ErrorKind::InvalidUnicode, _) => write!(f, "argument is invalid unicode"),
            (ErrorKind::Custom, _) => write!(f, "{}", self.value().unwrap()),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind())
            .field("raw_value", &self.raw_value())
            .finish()
    }
}

impl std::error::Error for Error {}

enum ErrorValue {
    String(String),
    OsString(OsString),
}

struct ErrorRepr {
    kind: ErrorKind,
    value: Option<ErrorValue>,
    limit: Option<usize>,
}

/// Represents a parsing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Emitted when a short option token has no character after the hyphen.
    MissingShortName,
    /// Emitted when a bare value appears where an option name was expected.
    UnexpectedValue,
    /// Emitted when more options are supplied than the configured limit.
    CapacityExceeded,
    /// Happens when an option name or attached value is invalid unicode.
    InvalidUnicode,
    /// A custom message
    Custom,
}

/// The name of a parsed option.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptName {
    /// A single character option name (`-n`)
    Short(char),
    /// A long option name (`--name`)
    Long(String),
}

/// One parsed option.
///
/// An option is a long or short name plus an optional text value.  The
/// value is present only if the command line supplied one, embedded or as
/// the following argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opt {
    name: OptName,
    value: Option<String>,
}

impl Opt {
    /// Creates a long option without a value.
    pub fn long(name: impl Into<String>) -> Opt {
        Opt {
            name: OptName::Long(name.into()),
            value: None,
        }
    }

    /// Creates a short option without a value.
    pub fn short(name: char) -> Opt {
        Opt {
            name: OptName::Short(name),
            value: None,
        }
    }

    /// Returns the option with the given value attached.
    pub fn with_value(mut self, value: impl Into<String>) -> Opt {
        self.value = Some(value.into());
        self
    }

    /// Returns the option's name.
    pub fn name(&self) -> &OptName {
        &self.name
    }

    /// Returns the option's value, if one was supplied.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        match &self.name {
            OptName::Short(r) => c == *r,
            OptName::Long(_) => false,
        }
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        match &self.name {
            OptName::Long(s) => s == name,
            OptName::Short(_) => false,
        }
    }

    /// Is this either a specific short or a specific long option?
    pub fn is_either(&self, c: char, name: &str) -> bool {
        self.is_short(c) || self.is_long(name)
    }
}

/// The options collected from one command line.
///
/// Options keep the order they appeared in on the command line.  The
/// collection grows up to an explicit limit; [`push`](Self::push) refuses
/// to go past it.  Dropping the collection releases it, there is no
/// separate free step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOptions {
    opts: Vec<Opt>,
    limit: usize,
}

impl ParsedOptions {
    /// Creates an empty collection with the [`DEFAULT_OPT_LIMIT`].
    pub fn new() -> ParsedOptions {
        ParsedOptions::with_limit(DEFAULT_OPT_LIMIT)
    }

    /// Creates an empty collection with the given option limit.
    pub fn with_limit(limit: usize) -> ParsedOptions {
        ParsedOptions {
            opts: Vec::new(),
            limit,
        }
    }

    /// Appends an option, enforcing the configured limit.
    pub fn push(&mut self, opt: Opt) -> Result<(), Error> {
        if self.opts.len() >= self.limit {
            return Err(Error::new(ErrorKind::CapacityExceeded).with_limit(self.limit));
        }
        self.opts.push(opt);
        Ok(())
    }

    /// Returns the number of collected options.
    pub fn len(&self) -> usize {
        self.opts.len()
    }

    /// Returns `true` if no options were collected.
    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    /// Returns the configured option limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the option at the given position.
    pub fn get(&self, index: usize) -> Option<&Opt> {
        self.opts.get(index)
    }

    /// Iterates over the options in command line order.
    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.opts.iter()
    }

    /// Finds the first long option with the given name.
    ///
    /// Returns `None` if the option never appeared.  A found option may
    /// still carry no value, check [`Opt::value`] to tell the two apart.
    pub fn find_long(&self, name: &str) -> Option<&Opt> {
        self.opts.iter().find(|opt| opt.is_long(name))
    }

    /// Finds the first short option with the given name.
    ///
    /// Same semantics as [`find_long`](Self::find_long).
    pub fn find_short(&self, name: char) -> Option<&Opt> {
        self.opts.iter().find(|opt| opt.is_short(name))
    }
}

impl Default for ParsedOptions {
    fn default() -> ParsedOptions {
        ParsedOptions::new()
    }
}

impl<'a> IntoIterator for &'a ParsedOptions {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.opts.iter()
    }
}

/// What the next unconsumed argument is, judged by shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// The `--` terminator, or no arguments left
    EndOfArgs,
    /// A `--name` argument, possibly carrying an embedded `=value`
    Long,
    /// A `-n` argument, possibly carrying an embedded value
    Short,
    /// Anything else, including a lone `-`
    Value,
}

/// Classifies the next unconsumed argument.
///
/// Only the argument's shape is inspected (byte length and leading
/// hyphens), never its content.  The same classification decides what the
/// next parameter is and whether a token attaches as a value.
fn classify(arg: Option<&OsStr>) -> Kind {
    let bytes = match arg {
        Some(arg) => arg.as_encoded_bytes(),
        None => return Kind::EndOfArgs,
    };
    if bytes == b"--" {
        Kind::EndOfArgs
    } else if bytes.len() > 2 && bytes.starts_with(b"--") {
        Kind::Long
    } else if bytes.len() > 1 && bytes.first() == Some(&b'-') {
        Kind::Short
    } else {
        Kind::Value
    }
}

/// A cursor over one command line that assembles options one at a time.
///
/// The parser steps strictly forward over an iterator of command line
/// arguments with a single token of lookahead and no backtracking.  Each
/// call to [`next_opt`](Self::next_opt) is a complete step that yields one
/// option or signals the end of the options; no other state carries over
/// between calls.  To collect everything in one go use [`parse`] or
/// [`collect_opts`](Self::collect_opts).
pub struct Parser<'it> {
    args: Box<dyn Iterator<Item = OsString> + 'it>,
    current: Option<OsString>,
    prog: Option<OsString>,
    limit: usize,
    done: bool,
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("prog", &self.prog)
            .field("finished", &self.finished())
            .finish()
    }
}

impl<'it> Parser<'it> {
    /// Creates a parser from the environment.
    pub fn from_env() -> Parser<'static> {
        Parser::from_cmdline(std::env::args_os())
    }

    /// Creates a parser from the given split command line.
    ///
    /// The first argument must be the name of the program.  It is held
    /// aside unclassified and is available via [`prog`](Self::prog).
    pub fn from_cmdline<I, S>(args: I) -> Parser<'it>
    where
        I: Iterator<Item = S> + 'it,
        S: Into<OsString> + 'it,
    {
        let mut args = args.map(Into::into);
        Parser {
            prog: args.next(),
            current: args.next(),
            args: Box::new(args),
            limit: DEFAULT_OPT_LIMIT,
            done: false,
        }
    }

    /// Creates a parser from just the arguments.
    ///
    /// In this case the program name is empty.
    pub fn from_args<I, S>(args: I) -> Parser<'it>
    where
        I: Iterator<Item = S> + 'it,
        S: Into<OsString> + 'it,
    {
        Parser::from_cmdline(once(OsString::new()).chain(args.map(Into::into)))
    }

    /// Returns the normalized program name (first argument).
    ///
    /// This will only have the file name portion of the first
    /// argument if it was passed as full path.  If you want the full,
    /// unprocessed first argument use [`raw_prog`](Self::raw_prog) instead.
    pub fn prog(&self) -> &str {
        self.raw_prog()
            .map(Path::new)
            .and_then(|x| x.file_name())
            .and_then(|x| x.to_str())
            .unwrap_or_default()
    }

    /// Returns the raw first argument.
    ///
    /// This will be the full path name if it's there.
    pub fn raw_prog(&self) -> Option<&OsStr> {
        self.prog.as_deref()
    }

    /// Returns the option limit applied by [`collect_opts`](Self::collect_opts).
    #[inline]
    pub fn opt_limit(&self) -> usize {
        self.limit
    }

    /// Changes the option limit applied by [`collect_opts`](Self::collect_opts).
    #[inline]
    pub fn set_opt_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Assembles the next option from the command line.
    ///
    /// Returns `Ok(None)` once the `--` terminator or the end of the
    /// command line is reached.  The terminator itself is consumed but the
    /// arguments after it are left untouched; they can be collected with
    /// [`raw_arg`](Self::raw_arg).
    ///
    /// A name is joined with its value using one token of lookahead: an
    /// embedded value (`--name=value`, `-nvalue`) comes out of the name's
    /// own argument, otherwise the following argument is taken if and only
    /// if it classifies as a value.
    pub fn next_opt(&mut self) -> Result<Option<Opt>, Error> {
        if self.done {
            return Ok(None);
        }
        match classify(self.current.as_deref()) {
            Kind::EndOfArgs => {
                // consume the terminator, nothing past it
                self.advance();
                self.done = true;
                Ok(None)
            }
            Kind::Value => {
                // a lone `-` is a short option missing its character,
                // everything else is a stray value
                let arg = self.advance().unwrap();
                if arg.as_encoded_bytes() == b"-" {
                    Err(Error::new(ErrorKind::MissingShortName))
                } else {
                    Err(Error::new(ErrorKind::UnexpectedValue)
                        .with_value(ErrorValue::OsString(arg)))
                }
            }
            Kind::Long => {
                let arg = into_string(self.advance().unwrap())?;
                let rest = &arg[2..];
                let opt = match rest.split_once('=') {
                    Some((name, value)) => Opt::long(name).with_value(value),
                    None => {
                        let mut opt = Opt::long(rest);
                        opt.value = self.take_value()?;
                        opt
                    }
                };
                Ok(Some(opt))
            }
            Kind::Short => {
                let arg = into_string(self.advance().unwrap())?;
                // the classifier guarantees at least one character after
                // the hyphen
                let mut rest = arg[1..].chars();
                let name = rest.next().unwrap();
                let mut opt = Opt::short(name);
                if rest.as_str().is_empty() {
                    opt.value = self.take_value()?;
                } else {
                    opt.value = Some(rest.as_str().to_string());
                }
                Ok(Some(opt))
            }
        }
    }

    /// Assembles all remaining options into a [`ParsedOptions`].
    ///
    /// Stops at the `--` terminator or the end of the command line.  The
    /// collection is created with the parser's [`opt_limit`](Self::opt_limit)
    /// and appending past it fails with [`ErrorKind::CapacityExceeded`].
    pub fn collect_opts(&mut self) -> Result<ParsedOptions, Error> {
        let mut opts = ParsedOptions::with_limit(self.limit);
        while let Some(opt) = self.next_opt()? {
            opts.push(opt)?;
        }
        Ok(opts)
    }

    /// Peeks at the current, unconsumed raw argument.
    pub fn peek_raw_arg(&self) -> Option<&OsStr> {
        self.current.as_deref()
    }

    /// Returns the current raw argument and goes one argument forward.
    ///
    /// No classification is applied.  After the options have been
    /// assembled this hands out whatever followed the terminator, one
    /// argument at a time.
    pub fn raw_arg(&mut self) -> Option<OsString> {
        self.advance()
    }

    /// Returns `true` if the parser reached the end of the command line.
    #[inline]
    pub fn finished(&self) -> bool {
        self.current.is_none()
    }

    /// Takes the next argument as a value if it classifies as one.
    fn take_value(&mut self) -> Result<Option<String>, Error> {
        match classify(self.current.as_deref()) {
            Kind::Value => into_string(self.advance().unwrap()).map(Some),
            _ => Ok(None),
        }
    }

    /// Moves ahead one argument.
    fn advance(&mut self) -> Option<OsString> {
        replace(&mut self.current, self.args.next())
    }
}

/// Parses a full command line into a [`ParsedOptions`].
///
/// The first element must be the name of the program; it is skipped and
/// never classified.  Parsing stops at the `--` terminator.  Whatever
/// follows the terminator is dropped here; drive a [`Parser`] yourself if
/// you need it.  The collection is bounded by the [`DEFAULT_OPT_LIMIT`].
pub fn parse<'it, I, S>(cmdline: I) -> Result<ParsedOptions, Error>
where
    I: Iterator<Item = S> + 'it,
    S: Into<OsString> + 'it,
{
    parse_with_limit(cmdline, DEFAULT_OPT_LIMIT)
}

/// Parses a full command line with an explicit option limit.
///
/// This behaves like [`parse`] but bounds the collection at `limit`
/// options instead of the default.
pub fn parse_with_limit<'it, I, S>(cmdline: I, limit: usize) -> Result<ParsedOptions, Error>
where
    I: Iterator<Item = S> + 'it,
    S: Into<OsString> + 'it,
{
    let mut parser = Parser::from_cmdline(cmdline);
    parser.set_opt_limit(limit);
    parser.collect_opts()
}

fn into_string(s: OsString) -> Result<String, Error> {
    s.into_string()
        .map_err(|s| Error::new(ErrorKind::InvalidUnicode).with_value(ErrorValue::OsString(s)))
}
