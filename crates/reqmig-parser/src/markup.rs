//! Markup parser for diagram command documents.
//!
//! The command document is angle-bracket markup: an optional prolog,
//! exactly one root element, nested elements with quoted attributes. Text,
//! comments, CDATA sections and processing instructions are accepted and
//! dropped. The public entry point is [`parse_document`].

use std::borrow::Cow;

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, opt, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_until, take_while},
};

use crate::{
    element::{Attribute, Element},
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// Diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkupDiagnostic {
    code: ErrorCode,
    message: Cow<'static, str>,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
    /// Opening tag of the element the error relates to, if any.
    opened_at: Option<Span>,
}

impl MarkupDiagnostic {
    fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>, start: usize) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
            start,
            opened_at: None,
        }
    }

    fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    fn opened_at(mut self, span: Span) -> Self {
        self.opened_at = Some(span);
        self
    }
}

/// Deepest element nesting accepted; the root element is at depth 1.
const MAX_DEPTH: usize = 64;

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<MarkupDiagnostic>>;

fn fail<O>(input: &Input<'_>, diagnostic: MarkupDiagnostic) -> IResult<O> {
    Err(ErrMode::Cut(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        diagnostic,
    )))
}

/// Element or attribute name, optionally namespace-prefixed (`dg:rect`).
fn name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
    })
    .verify(|s: &str| {
        s.chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
    })
    .parse_next(input)
}

/// `<!-- ... -->`
fn comment(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    preceded(
        "<!--",
        cut_err(terminated(take_until(0.., "-->"), "-->")).context(
            MarkupDiagnostic::new(ErrorCode::E003, "unterminated comment", start)
                .with_help("add the closing `-->`"),
        ),
    )
    .void()
    .parse_next(input)
}

/// `<![CDATA[ ... ]]>`
fn cdata(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    preceded(
        "<![CDATA[",
        cut_err(terminated(take_until(0.., "]]>"), "]]>")).context(
            MarkupDiagnostic::new(ErrorCode::E003, "unterminated CDATA section", start)
                .with_help("add the closing `]]>`"),
        ),
    )
    .void()
    .parse_next(input)
}

/// `<? ... ?>`
fn processing_instruction(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    preceded(
        "<?",
        cut_err(terminated(take_until(0.., "?>"), "?>")).context(
            MarkupDiagnostic::new(ErrorCode::E003, "unterminated processing instruction", start)
                .with_help("add the closing `?>`"),
        ),
    )
    .void()
    .parse_next(input)
}

/// `<!DOCTYPE ...>` and similar declarations, including a bracketed
/// internal subset.
fn declaration(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    "<!".parse_next(input)?;

    let mut depth = 0usize;
    while let Some(c) = input.next_token() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => return Ok(()),
            _ => {}
        }
    }

    fail(
        input,
        MarkupDiagnostic::new(ErrorCode::E003, "unterminated declaration", start)
            .with_help("add the closing `>`"),
    )
}

/// Character data between tags.
fn text(input: &mut Input<'_>) -> IResult<()> {
    take_till(1.., '<').void().parse_next(input)
}

/// A single- or double-quoted attribute value with entities decoded.
fn quoted_value(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();
    let quote = one_of(['"', '\'']).parse_next(input)?;

    cut_err(terminated(take_till(0.., move |c: char| c == quote), quote))
        .context(
            MarkupDiagnostic::new(ErrorCode::E001, "unterminated attribute value", start)
                .with_help("add the closing quote"),
        )
        .map(decode_entities)
        .parse_next(input)
}

/// `name = "value"`
fn attribute(input: &mut Input<'_>) -> IResult<Attribute> {
    let start = input.current_token_start();
    let (name, _, _) = (name, multispace0, '=').parse_next(input)?;

    let value_start = input.current_token_start();
    let value = cut_err(preceded(multispace0, quoted_value))
        .context(
            MarkupDiagnostic::new(ErrorCode::E002, "expected a quoted attribute value", value_start)
                .with_help("quote the value: `name=\"value\"`"),
        )
        .parse_next(input)?;

    let span = Span::new(start..input.current_token_start());
    Ok(Attribute::new(name, value, span))
}

/// One item of element content at `depth`; only nested elements are kept.
fn content<'a>(input: &mut Input<'a>, depth: usize) -> IResult<Option<Element>> {
    alt((
        comment.map(|()| None),
        cdata.map(|()| None),
        processing_instruction.map(|()| None),
        (|input: &mut Input<'a>| element(input, depth)).map(Some),
        text.map(|()| None),
    ))
    .parse_next(input)
}

/// `</name>` matching the element opened with `open_name`.
fn closing_tag(input: &mut Input<'_>, open_name: &str, opened_at: Span) -> IResult<()> {
    let start = input.current_token_start();

    if input.is_empty() {
        return fail(
            input,
            MarkupDiagnostic::new(
                ErrorCode::E101,
                format!("element `<{open_name}>` is never closed"),
                start,
            )
            .with_help("add the missing closing tag")
            .opened_at(opened_at),
        );
    }

    let unexpected = MarkupDiagnostic::new(ErrorCode::E002, "unexpected character", start);
    cut_err("</").context(unexpected.clone()).parse_next(input)?;
    let close_name = cut_err(name).context(unexpected).parse_next(input)?;

    if close_name != open_name {
        return fail(
            input,
            MarkupDiagnostic::new(
                ErrorCode::E100,
                format!("closing tag `</{close_name}>` does not match `<{open_name}>`"),
                start,
            )
            .with_help("close the inner element before its parent")
            .opened_at(opened_at),
        );
    }

    let end = input.current_token_start();
    (multispace0, cut_err('>'))
        .context(MarkupDiagnostic::new(ErrorCode::E002, "expected `>`", end))
        .void()
        .parse_next(input)
}

/// An element at `depth` with its attributes and nested elements.
fn element<'a>(input: &mut Input<'a>, depth: usize) -> IResult<Element> {
    let start = input.current_token_start();
    let name = preceded('<', name).parse_next(input)?;
    let opened_at = Span::new(start..input.current_token_start());

    if depth > MAX_DEPTH {
        return fail(
            input,
            MarkupDiagnostic::new(
                ErrorCode::E104,
                format!("elements are nested more than {MAX_DEPTH} levels deep"),
                start,
            )
            .with_help("flatten nested groups"),
        );
    }

    let attributes: Vec<Attribute> =
        repeat(0.., preceded(multispace1, attribute)).parse_next(input)?;
    multispace0.parse_next(input)?;

    let tag_end = input.current_token_start();
    let self_closing = cut_err(alt(("/>".value(true), '>'.value(false))))
        .context(
            MarkupDiagnostic::new(ErrorCode::E002, "expected `>` or `/>`", tag_end)
                .opened_at(opened_at),
        )
        .parse_next(input)?;

    let children = if self_closing {
        Vec::new()
    } else {
        let children = repeat(0.., |input: &mut Input<'a>| content(input, depth + 1))
            .fold(Vec::new, |mut acc: Vec<Element>, item| {
                acc.extend(item);
                acc
            })
            .parse_next(input)?;
        closing_tag(input, name, opened_at)?;
        children
    };

    let span = Span::new(start..input.current_token_start());
    Ok(Element::new(name, attributes, children, span))
}

/// Whitespace, comments, processing instructions and declarations around
/// the root element.
fn misc(input: &mut Input<'_>) -> IResult<()> {
    alt((
        multispace1.void(),
        comment,
        processing_instruction,
        declaration,
    ))
    .parse_next(input)
}

fn document<'a>(input: &mut Input<'a>) -> IResult<Element> {
    opt('\u{feff}').parse_next(input)?;
    let () = repeat(0.., misc).parse_next(input)?;

    let start = input.current_token_start();
    let root = cut_err(|input: &mut Input<'a>| element(input, 1))
        .context(
            MarkupDiagnostic::new(ErrorCode::E102, "missing root element", start)
                .with_help("a command document must contain one root element"),
        )
        .parse_next(input)?;

    let () = repeat(0.., misc).parse_next(input)?;

    if !input.is_empty() {
        let trailing = input.current_token_start();
        return fail(
            input,
            MarkupDiagnostic::new(
                ErrorCode::E103,
                "unexpected content after the root element",
                trailing,
            )
            .opened_at(root.span()),
        );
    }

    Ok(root)
}

/// Decodes the predefined and numeric character references.
///
/// References that are unknown or malformed are kept literally.
pub(crate) fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest[1..]
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..1 + semi]).map(|c| (c, semi + 2)));

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Convert an ErrMode and error position to a Diagnostic.
fn convert_err_mode(
    err: ErrMode<ContextError<MarkupDiagnostic>>,
    error_pos: usize,
    source: &str,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let char_end = |pos: usize| {
        pos + source
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8)
    };

    if let Some(MarkupDiagnostic {
        code,
        message,
        help,
        start,
        opened_at,
    }) = context_error.context().next()
    {
        let span = if *start < error_pos {
            Span::new(*start..error_pos)
        } else {
            Span::new(*start..char_end(*start))
        };

        let mut diag = Diagnostic::error(message.clone())
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(opened_at) = opened_at {
            diag = diag.with_secondary_label(*opened_at, "element opened here");
        }
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    Diagnostic::error("unexpected character")
        .with_code(ErrorCode::E002)
        .with_label(
            Span::new(error_pos..char_end(error_pos)),
            ErrorCode::E002.description(),
        )
}

/// Parses a command document into its root element.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first structural problem found.
pub fn parse_document(source: &str) -> Result<Element, ParseError> {
    let mut input = LocatingSlice::new(source);
    document(&mut input).map_err(|e| {
        let error_pos = input.current_token_start();
        convert_err_mode(e, error_pos, source).into()
    })
}
