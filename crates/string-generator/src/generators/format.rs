//! printf-style formatting with arguments supplied at runtime.
//!
//! Verbs: `%s %v %d %x %X %o %b %c %q %t %f %e %E %g %%`.
//! Flags: `-` (left align), `+`, space, `0` (zero pad), `#` (radix prefix).
//! Width and `.precision` are decimal literals, capped at [`MAX_WIDTH`] and
//! [`MAX_PRECISION`].

use crate::error::GenerationError;
use std::fmt;

/// A runtime argument for a [`format`](crate::format) unit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl FormatArg {
    fn kind(&self) -> &'static str {
        match self {
            FormatArg::Str(_) => "string",
            FormatArg::Int(_) => "int",
            FormatArg::Uint(_) => "uint",
            FormatArg::Float(_) => "float",
            FormatArg::Bool(_) => "bool",
            FormatArg::Char(_) => "char",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(i) => write!(f, "{i}"),
            FormatArg::Uint(u) => write!(f, "{u}"),
            FormatArg::Float(x) => write!(f, "{x}"),
            FormatArg::Bool(b) => write!(f, "{b}"),
            FormatArg::Char(c) => write!(f, "{c}"),
        }
    }
}

macro_rules! impl_from_arg {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for FormatArg {
                fn from(value: $source) -> Self {
                    FormatArg::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_arg!(Int, i64, i8, i16, i32, i64, isize);
impl_from_arg!(Uint, u64, u8, u16, u32, u64, usize);
impl_from_arg!(Float, f64, f32, f64);

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        FormatArg::Bool(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Char(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

/// Widest padding a directive may request.
pub const MAX_WIDTH: usize = 1_000_000;

/// Largest precision a directive may request.
pub const MAX_PRECISION: usize = 10_000;

#[derive(Debug, Default)]
struct Directive {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Render `template` with `args` and append the result to `buf`.
///
/// Every argument must be consumed exactly once.
pub fn append_format(
    buf: &mut String,
    template: &str,
    args: &[FormatArg],
) -> Result<(), GenerationError> {
    let mut chars = template.char_indices().peekable();
    let mut next_arg = 0;

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            buf.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&(_, flag)) = chars.peek() {
            match flag {
                '-' => directive.left = true,
                '+' => directive.plus = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                '#' => directive.alternate = true,
                _ => break,
            }
            chars.next();
        }
        directive.width = take_number(&mut chars);
        if matches!(chars.peek(), Some((_, '.'))) {
            chars.next();
            directive.precision = Some(take_number(&mut chars).unwrap_or(0));
        }

        if directive.width.is_some_and(|w| w > MAX_WIDTH) {
            return Err(GenerationError::Format(format!(
                "width at byte {start} of {template:?} exceeds {MAX_WIDTH}"
            )));
        }
        if directive.precision.is_some_and(|p| p > MAX_PRECISION) {
            return Err(GenerationError::Format(format!(
                "precision at byte {start} of {template:?} exceeds {MAX_PRECISION}"
            )));
        }

        let Some((_, verb)) = chars.next() else {
            return Err(GenerationError::Format(format!(
                "incomplete verb at byte {start} of {template:?}"
            )));
        };
        if verb == '%' {
            buf.push('%');
            continue;
        }

        let arg = args.get(next_arg).ok_or_else(|| {
            GenerationError::Format(format!(
                "missing argument {} for %{verb} in {template:?}",
                next_arg + 1
            ))
        })?;
        next_arg += 1;

        let body = render(verb, &directive, arg).map_err(|reason| {
            GenerationError::Format(format!("%{verb} at byte {start} of {template:?}: {reason}"))
        })?;
        pad(buf, &directive, verb, body);
    }

    if next_arg < args.len() {
        return Err(GenerationError::Format(format!(
            "{} unused argument(s) for {template:?}",
            args.len() - next_arg
        )));
    }
    Ok(())
}

fn take_number(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn mismatch(arg: &FormatArg) -> String {
    format!("argument of type {} does not fit this verb", arg.kind())
}

/// Render one argument without width padding.
fn render(verb: char, directive: &Directive, arg: &FormatArg) -> Result<String, String> {
    let out = match verb {
        's' | 'v' => {
            let text = arg.to_string();
            match (arg, directive.precision) {
                (FormatArg::Float(x), Some(p)) => format!("{x:.p$}"),
                (FormatArg::Str(_), Some(p)) => text.chars().take(p).collect(),
                _ => signed(directive, text),
            }
        }
        'd' => match arg {
            FormatArg::Int(i) => signed(directive, i.to_string()),
            FormatArg::Uint(u) => signed(directive, u.to_string()),
            _ => return Err(mismatch(arg)),
        },
        'x' | 'X' | 'o' | 'b' => radix(verb, directive, arg)?,
        'c' => match arg {
            FormatArg::Char(c) => c.to_string(),
            FormatArg::Int(i) => u32::try_from(*i)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("{i} is not a valid code point"))?
                .to_string(),
            FormatArg::Uint(u) => u32::try_from(*u)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| format!("{u} is not a valid code point"))?
                .to_string(),
            _ => return Err(mismatch(arg)),
        },
        'q' => match arg {
            FormatArg::Str(s) => format!("{s:?}"),
            FormatArg::Char(c) => format!("{c:?}"),
            _ => return Err(mismatch(arg)),
        },
        't' => match arg {
            FormatArg::Bool(b) => b.to_string(),
            _ => return Err(mismatch(arg)),
        },
        'f' | 'e' | 'E' | 'g' => {
            let FormatArg::Float(x) = arg else {
                return Err(mismatch(arg));
            };
            let text = match verb {
                'f' => format!("{x:.p$}", p = directive.precision.unwrap_or(6)),
                'g' => general(*x, directive.precision, directive.alternate),
                _ => exponent(*x, directive.precision.unwrap_or(6), verb == 'E'),
            };
            signed(directive, text)
        }
        other => return Err(format!("unknown verb %{other}")),
    };
    Ok(out)
}

/// Apply `+`/space sign flags to an already rendered number.
fn signed(directive: &Directive, text: String) -> String {
    if text.starts_with('-') || !(directive.plus || directive.space) {
        return text;
    }
    if text.starts_with(|c: char| c.is_ascii_digit()) || text == "inf" {
        let sign = if directive.plus { '+' } else { ' ' };
        return format!("{sign}{text}");
    }
    text
}

fn radix(verb: char, directive: &Directive, arg: &FormatArg) -> Result<String, String> {
    let (negative, magnitude) = match arg {
        FormatArg::Int(i) => (*i < 0, i.unsigned_abs()),
        FormatArg::Uint(u) => (false, *u),
        FormatArg::Str(s) if verb == 'x' || verb == 'X' => {
            let hex: String = s.bytes().map(|b| format!("{b:02x}")).collect();
            return Ok(if verb == 'X' { hex.to_uppercase() } else { hex });
        }
        _ => return Err(mismatch(arg)),
    };

    let (prefix, digits) = match verb {
        'x' => ("0x", format!("{magnitude:x}")),
        'X' => ("0X", format!("{magnitude:X}")),
        'o' => ("0", format!("{magnitude:o}")),
        _ => ("0b", format!("{magnitude:b}")),
    };
    let prefix = if directive.alternate { prefix } else { "" };
    let sign = if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    };
    Ok(format!("{sign}{prefix}{digits}"))
}

/// C-style exponent: at least two exponent digits and an explicit sign.
fn exponent(x: f64, precision: usize, upper: bool) -> String {
    let rendered = format!("{x:.precision$e}");
    let Some((mantissa, exp)) = rendered.split_once('e') else {
        // inf and NaN carry no exponent
        return rendered;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{digits:0>2}")
}

/// `%g` as in C printf: `p` significant digits (default 6), exponent form
/// when the exponent is below -4 or at least `p`, trailing zeros dropped
/// unless `#` is set.
fn general(x: f64, precision: Option<usize>, alternate: bool) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let p = precision.unwrap_or(6).max(1);
    // The exponent after rounding to `p` digits decides the form.
    let rounded = format!("{x:.prec$e}", prec = p - 1);
    let exp: i64 = rounded
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exp < -4 || exp >= p as i64 {
        let text = exponent(x, p - 1, false);
        if alternate {
            return text;
        }
        match text.split_once('e') {
            Some((mantissa, tail)) => format!("{}e{tail}", trim_fraction(mantissa)),
            None => text,
        }
    } else {
        let decimals = (p as i64 - 1 - exp) as usize;
        let text = format!("{x:.decimals$}");
        if alternate {
            text
        } else {
            trim_fraction(&text).to_string()
        }
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn pad(buf: &mut String, directive: &Directive, verb: char, body: String) {
    let len = body.chars().count();
    let width = directive.width.unwrap_or(0);
    if len >= width {
        buf.push_str(&body);
        return;
    }
    let fill = width - len;

    if directive.left {
        buf.push_str(&body);
        buf.extend(std::iter::repeat(' ').take(fill));
        return;
    }

    let numeric = matches!(verb, 'd' | 'x' | 'X' | 'o' | 'b' | 'f' | 'e' | 'E' | 'g');
    if directive.zero && numeric {
        // Zeros go between the sign/prefix and the digits.
        let split = sign_and_prefix_len(&body);
        buf.push_str(&body[..split]);
        buf.extend(std::iter::repeat('0').take(fill));
        buf.push_str(&body[split..]);
    } else {
        buf.extend(std::iter::repeat(' ').take(fill));
        buf.push_str(&body);
    }
}

fn sign_and_prefix_len(body: &str) -> usize {
    let mut idx = 0;
    if body.starts_with(['-', '+', ' ']) {
        idx = 1;
    }
    let rest = &body[idx..];
    for prefix in ["0x", "0X", "0b"] {
        if rest.starts_with(prefix) {
            return idx + prefix.len();
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_all(template: &str, args: &[FormatArg]) -> Result<String, GenerationError> {
        let mut buf = String::new();
        append_format(&mut buf, template, args)?;
        Ok(buf)
    }

    #[test]
    fn test_plain_text_and_percent() {
        assert_eq!(render_all("100%% sure", &[]).unwrap(), "100% sure");
    }

    #[test]
    fn test_strings_and_integers() {
        let out = render_all(
            "%s-%d-%05d-%-4d|",
            &["user".into(), 42i32.into(), 7i64.into(), 3u8.into()],
        )
        .unwrap();
        assert_eq!(out, "user-42-00007-3   |");
    }

    #[test]
    fn test_negative_zero_padding_keeps_sign_first() {
        assert_eq!(render_all("%06d", &[(-42i32).into()]).unwrap(), "-00042");
        assert_eq!(render_all("%+d", &[5i32.into()]).unwrap(), "+5");
    }

    #[test]
    fn test_radix_verbs() {
        let out = render_all(
            "%x %X %#x %o %b %08b",
            &[
                255u32.into(),
                255u32.into(),
                255u32.into(),
                8u32.into(),
                5u32.into(),
                5u32.into(),
            ],
        )
        .unwrap();
        assert_eq!(out, "ff FF 0xff 10 101 00000101");
    }

    #[test]
    fn test_hex_of_string() {
        assert_eq!(render_all("%x", &["AB".into()]).unwrap(), "4142");
    }

    #[test]
    fn test_floats() {
        let out = render_all(
            "%.2f %f %e %E",
            &[
                3.14159f64.into(),
                1.5f64.into(),
                1234.5f64.into(),
                0.00012f64.into(),
            ],
        )
        .unwrap();
        assert_eq!(out, "3.14 1.500000 1.234500e+03 1.200000E-04");
    }

    #[test]
    fn test_width_and_precision_on_strings() {
        assert_eq!(render_all("[%5s]", &["ab".into()]).unwrap(), "[   ab]");
        assert_eq!(render_all("[%-5s]", &["ab".into()]).unwrap(), "[ab   ]");
        assert_eq!(render_all("[%.3s]", &["abcdef".into()]).unwrap(), "[abc]");
    }

    #[test]
    fn test_char_quote_bool() {
        let out = render_all(
            "%c%c %q %t",
            &['x'.into(), 65u32.into(), "a\"b".into(), true.into()],
        )
        .unwrap();
        assert_eq!(out, "xA \"a\\\"b\" true");
    }

    #[test]
    fn test_missing_argument() {
        let err = render_all("%s and %s", &["one".into()]).unwrap_err();
        assert!(matches!(err, GenerationError::Format(msg) if msg.contains("missing argument 2")));
    }

    #[test]
    fn test_unused_arguments() {
        let err = render_all("%s", &["one".into(), "two".into()]).unwrap_err();
        assert!(matches!(err, GenerationError::Format(msg) if msg.contains("1 unused")));
    }

    #[test]
    fn test_type_mismatch() {
        let err = render_all("%d", &["seven".into()]).unwrap_err();
        assert!(matches!(err, GenerationError::Format(msg) if msg.contains("string")));
    }

    #[test]
    fn test_unknown_verb_and_trailing_percent() {
        assert!(render_all("%k", &[1i32.into()]).is_err());
        assert!(render_all("50%", &[]).is_err());
    }

    #[test]
    fn test_value_verb_accepts_anything() {
        let out = render_all("%v/%v/%v", &[1i32.into(), 2.5f64.into(), false.into()]).unwrap();
        assert_eq!(out, "1/2.5/false");
    }

    #[test]
    fn test_general_significant_digits() {
        let g = |template: &str, x: f64| render_all(template, &[x.into()]).unwrap();
        assert_eq!(g("%.3g", 3.14159), "3.14");
        assert_eq!(g("%g", 3.14159), "3.14159");
        assert_eq!(g("%g", 100000.0), "100000");
        assert_eq!(g("%g", 1234567.0), "1.23457e+06");
        assert_eq!(g("%g", 1e21), "1e+21");
        assert_eq!(g("%g", 0.0001), "0.0001");
        assert_eq!(g("%g", 0.00001234), "1.234e-05");
        assert_eq!(g("%g", 0.0), "0");
        assert_eq!(g("%.2g", -0.5), "-0.5");
        assert_eq!(g("%#.3g", 2.0), "2.00");
        assert_eq!(g("%+g", 2.5), "+2.5");
    }

    #[test]
    fn test_oversized_width_rejected() {
        let err = render_all("%99999999999999999999999d", &[1i32.into()]).unwrap_err();
        assert!(matches!(err, GenerationError::Format(msg) if msg.contains("width")));
        assert!(render_all("%1000001s", &["a".into()]).is_err());
        assert_eq!(render_all("%1000000s", &["a".into()]).unwrap().len(), 1_000_000);
    }

    #[test]
    fn test_oversized_precision_rejected() {
        let err = render_all("%.99999999999f", &[1.5f64.into()]).unwrap_err();
        assert!(matches!(err, GenerationError::Format(msg) if msg.contains("precision")));
        assert!(render_all("%.10001e", &[1.5f64.into()]).is_err());
        assert!(render_all("%.10000g", &[1.5f64.into()]).is_ok());
    }
}
