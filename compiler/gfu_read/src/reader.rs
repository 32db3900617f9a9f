//! The reader proper.

use gfu_diagnostic::{Diagnostics, E};
use gfu_ir::{Form, FormKind, Pos, SymbolTable};
use gfu_stack::ensure_sufficient_stack;

/// Suffix turning the preceding form into a splat.
const SPLAT: &str = "..";

/// Reads forms from one source unit.
///
/// Create a fresh reader per source; it keeps no state besides its offset
/// into `text`.
pub struct Reader<'a> {
    syms: &'a SymbolTable,
    diag: &'a Diagnostics,
    text: &'a str,
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(syms: &'a SymbolTable, diag: &'a Diagnostics, text: &'a str) -> Self {
        Reader {
            syms,
            diag,
            text,
            offset: 0,
        }
    }

    /// Read the next form starting at `pos`.
    ///
    /// Returns the form and the position right after it, or `None` once
    /// only whitespace and comments remain.
    pub fn read(&mut self, pos: Pos) -> Result<Option<(Form, Pos)>, E> {
        let mut pos = pos;
        let form = self.read_next(&mut pos)?;
        Ok(form.map(|form| (form, pos)))
    }

    /// Read every remaining form, threading the position between them.
    pub fn read_all(&mut self, pos: Pos) -> Result<Vec<Form>, E> {
        let mut forms = Vec::new();
        let mut pos = pos;
        while let Some((form, next)) = self.read(pos)? {
            forms.push(form);
            pos = next;
        }
        Ok(forms)
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, pos: &mut Pos) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        pos.advance(c);
        Some(c)
    }

    fn skip_ws(&mut self, pos: &mut Pos) {
        while let Some(c) = self.peek() {
            if c == ';' {
                while let Some(c) = self.bump(pos) {
                    if c == '\n' {
                        break;
                    }
                }
            } else if c.is_whitespace() || c == ',' {
                self.bump(pos);
            } else {
                break;
            }
        }
    }

    fn read_next(&mut self, pos: &mut Pos) -> Result<Option<Form>, E> {
        self.skip_ws(pos);
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let start = pos.clone();

        let form = match c {
            '(' => {
                self.bump(pos);
                let items = self.read_items(pos, ')', "Open expression")?;
                Form::new(FormKind::Expr(items), start)
            }
            '[' => {
                self.bump(pos);
                let items = self.read_items(pos, ']', "Open vector")?;
                Form::new(FormKind::Vec(items), start)
            }
            ')' | ']' => {
                return Err(self
                    .diag
                    .read_error(start, format_args!("Unexpected char: {c}")));
            }
            _ => return self.read_atom(pos).map(Some),
        };

        let form = self.read_splat(form, pos);
        tracing::trace!(pos = ?form.pos, %form, "read form");
        Ok(Some(form))
    }

    fn read_items(&mut self, pos: &mut Pos, close: char, open_msg: &str) -> Result<Vec<Form>, E> {
        ensure_sufficient_stack(|| {
            let mut items = Vec::new();
            loop {
                self.skip_ws(pos);
                match self.peek() {
                    None => return Err(self.diag.read_error(pos.clone(), open_msg)),
                    Some(c) if c == close => {
                        self.bump(pos);
                        return Ok(items);
                    }
                    Some(_) => match self.read_next(pos)? {
                        Some(item) => items.push(item),
                        None => return Err(self.diag.read_error(pos.clone(), open_msg)),
                    },
                }
            }
        })
    }

    /// Wrap `form` in a splat if `..` follows it directly.
    fn read_splat(&mut self, form: Form, pos: &mut Pos) -> Form {
        if !self.rest().starts_with(SPLAT) {
            return form;
        }
        for _ in 0..SPLAT.len() {
            self.bump(pos);
        }
        let start = form.pos.clone();
        Form::new(FormKind::Splat(Box::new(form)), start)
    }

    fn read_atom(&mut self, pos: &mut Pos) -> Result<Form, E> {
        let start = pos.clone();
        let begin = self.offset;
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.bump(pos);
        }
        let text = &self.text[begin..self.offset];

        let form = match text.strip_suffix(SPLAT) {
            Some("") => {
                return Err(self.diag.read_error(start, "Missing splat target"));
            }
            Some(inner) => {
                let inner = self.atom(inner, start.clone())?;
                Form::new(FormKind::Splat(Box::new(inner)), start)
            }
            None => self.atom(text, start)?,
        };
        tracing::trace!(pos = ?form.pos, %form, "read atom");
        Ok(form)
    }

    fn atom(&self, text: &str, start: Pos) -> Result<Form, E> {
        let kind = match text {
            "_" => FormKind::Nil,
            "T" => FormKind::Bool(true),
            "F" => FormKind::Bool(false),
            _ if is_int(text) => match text.parse::<i64>() {
                Ok(n) => FormKind::Int(n),
                Err(_) => {
                    return Err(self
                        .diag
                        .read_error(start, format_args!("Invalid integer: {text}")));
                }
            },
            _ => match self.syms.try_intern(text) {
                Ok(sym) => FormKind::Id(sym),
                Err(e) => return Err(self.diag.read_error(start, e)),
            },
        };
        Ok(Form::new(kind, start))
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',' | ';')
}

/// `-?[0-9]+`
fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
