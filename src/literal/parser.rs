//! Literal parser implementation.

use crate::core::{
    ArgResult, ArgumentError, IntArgument, IntKind, IntWidth, LambdaArgument, TensorArgument,
};
use crate::types::{FunctionSignature, TypeDescriptor, DYNAMIC_SIZE};

/// Run `$body` with `$t` bound to the primitive type of `$kind`.
macro_rules! with_backing {
    ($kind:expr, $t:ident => $body:expr) => {
        match ($kind.width, $kind.signed) {
            (IntWidth::W8, true) => {
                type $t = i8;
                $body
            }
            (IntWidth::W8, false) => {
                type $t = u8;
                $body
            }
            (IntWidth::W16, true) => {
                type $t = i16;
                $body
            }
            (IntWidth::W16, false) => {
                type $t = u16;
                $body
            }
            (IntWidth::W32, true) => {
                type $t = i32;
                $body
            }
            (IntWidth::W32, false) => {
                type $t = u32;
                $body
            }
            (IntWidth::W64, true) => {
                type $t = i64;
                $body
            }
            (IntWidth::W64, false) => {
                type $t = u64;
                $body
            }
        }
    };
}

pub(super) struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub(super) fn parse_argument_literal(mut self) -> ArgResult<LambdaArgument> {
        self.skip_whitespace();
        let encrypted = self.try_read('e');
        let kind = self.parse_kind()?;

        let arg = if self.try_read('[') {
            let dims = self.parse_dimensions()?;
            self.expect(']')?;
            self.expect(':')?;
            let values = self.parse_value_list()?;
            let tensor = build_tensor(kind, &values, &dims)?;
            if encrypted {
                LambdaArgument::ETensor(tensor)
            } else {
                LambdaArgument::Tensor(tensor)
            }
        } else {
            let precision = if self.try_read('p') {
                Some(self.parse_unsigned()?)
            } else {
                None
            };
            self.expect(':')?;
            let value = self.parse_integer()?;
            let scalar = build_scalar(kind, value, precision)?;
            if encrypted {
                LambdaArgument::EInt(scalar)
            } else {
                LambdaArgument::Int(scalar)
            }
        };

        self.expect_eof()?;
        log::trace!("parsed argument literal '{}' as {}", self.text, arg);
        Ok(arg)
    }

    pub(super) fn parse_type_literal(mut self) -> ArgResult<TypeDescriptor> {
        let ty = self.parse_type()?;
        self.expect_eof()?;
        Ok(ty)
    }

    pub(super) fn parse_signature_literal(mut self) -> ArgResult<FunctionSignature> {
        let mut params = Vec::new();

        self.skip_whitespace();
        if !self.is_eof() {
            params.push(self.parse_type()?);
            while self.try_read(',') {
                params.push(self.parse_type()?);
            }
        }

        self.expect_eof()?;
        Ok(FunctionSignature::new(params))
    }

    fn parse_type(&mut self) -> ArgResult<TypeDescriptor> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.read_ident();

        match name {
            "eint" | "esint" | "int" | "sint" => {
                self.expect('<')?;
                let width = self.parse_unsigned()?;
                self.expect('>')?;
                let signed = name.ends_with("sint");
                if name.starts_with('e') {
                    TypeDescriptor::encrypted(width, signed)
                } else {
                    Ok(TypeDescriptor::integer(width, signed))
                }
            }
            "tensor" => {
                self.expect('<')?;
                let mut shape = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.current_char() {
                        Some('?') => {
                            self.advance();
                            shape.push(DYNAMIC_SIZE);
                        }
                        Some(ch) if ch.is_ascii_digit() => {
                            let size = self.parse_integer()?;
                            shape.push(self.to_dimension(size)?);
                        }
                        _ => break,
                    }
                    self.expect('x')?;
                }
                if shape.is_empty() {
                    return Err(self.error("tensor types need at least one dimension"));
                }
                let element = self.parse_type()?;
                if matches!(element, TypeDescriptor::Tensor { .. }) {
                    return Err(self.error_at(start, "tensor elements must be scalar types"));
                }
                self.expect('>')?;
                Ok(TypeDescriptor::tensor(&shape, element))
            }
            "" => Err(self.error("expected a type")),
            other => Err(self.error_at(start, &format!("unknown type '{other}'"))),
        }
    }

    fn parse_kind(&mut self) -> ArgResult<IntKind> {
        let start = self.pos;
        let signed = match self.current_char() {
            Some('i') => true,
            Some('u') => false,
            _ => return Err(self.error("expected an integer kind (i8..i64, u8..u64)")),
        };
        self.advance();

        let bits = self.parse_unsigned()?;
        let name = format!("{}{bits}", if signed { 'i' } else { 'u' });
        IntKind::ALL
            .into_iter()
            .find(|kind| kind.short_name() == name)
            .ok_or_else(|| self.error_at(start, &format!("unsupported integer width {bits}")))
    }

    fn parse_dimensions(&mut self) -> ArgResult<Vec<i64>> {
        let mut dims = Vec::new();
        self.skip_whitespace();
        if self.current_char() == Some(']') {
            return Err(self.error("expected at least one dimension"));
        }

        loop {
            let size = self.parse_integer()?;
            dims.push(self.to_dimension(size)?);
            if !self.try_read('x') {
                break;
            }
        }
        Ok(dims)
    }

    fn parse_value_list(&mut self) -> ArgResult<Vec<i128>> {
        let mut values = Vec::new();
        self.skip_whitespace();
        if self.is_eof() {
            return Ok(values);
        }

        values.push(self.parse_integer()?);
        while self.try_read(',') {
            values.push(self.parse_integer()?);
        }
        Ok(values)
    }

    fn parse_unsigned(&mut self) -> ArgResult<u32> {
        let start = self.pos;
        let value = self.parse_integer()?;
        u32::try_from(value).map_err(|_| self.error_at(start, "expected a small unsigned integer"))
    }

    fn parse_integer(&mut self) -> ArgResult<i128> {
        self.skip_whitespace();
        let start = self.pos;
        let negative = self.try_read('-');

        let mut value: i128 = 0;
        let mut digits = 0;
        while let Some(digit) = self.current_char().and_then(|ch| ch.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as i128))
                .ok_or_else(|| self.error_at(start, "integer literal too large"))?;
            digits += 1;
            self.advance();
        }

        if digits == 0 {
            return Err(self.error_at(start, "expected an integer"));
        }
        Ok(if negative { -value } else { value })
    }

    fn to_dimension(&self, size: i128) -> ArgResult<i64> {
        i64::try_from(size).map_err(|_| self.error("dimension does not fit into 64 bits"))
    }

    fn read_ident(&mut self) -> &'a str {
        let text = self.text;
        let start = self.pos;
        while matches!(self.current_char(), Some(ch) if ch.is_ascii_alphabetic()) {
            self.advance();
        }
        &text[start..self.pos]
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn try_read(&mut self, ch: char) -> bool {
        self.skip_whitespace();
        if self.current_char() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> ArgResult<()> {
        if self.try_read(ch) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{ch}'")))
        }
    }

    fn expect_eof(&mut self) -> ArgResult<()> {
        self.skip_whitespace();
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }

    fn error(&self, reason: &str) -> ArgumentError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, pos: usize, reason: &str) -> ArgumentError {
        ArgumentError::Parse {
            pos,
            reason: reason.to_string(),
        }
    }
}

fn check_range(kind: IntKind, value: i128) -> ArgResult<()> {
    if kind.contains(value) {
        Ok(())
    } else {
        Err(ArgumentError::ValueOutOfRange { value, kind })
    }
}

fn build_scalar(kind: IntKind, value: i128, precision: Option<u32>) -> ArgResult<IntArgument> {
    check_range(kind, value)?;
    let precision = precision.unwrap_or_else(|| kind.bits());
    Ok(with_backing!(kind, T => IntArgument::with_precision(value as T, precision)))
}

fn build_tensor(kind: IntKind, values: &[i128], dims: &[i64]) -> ArgResult<TensorArgument> {
    for &value in values {
        check_range(kind, value)?;
    }
    Ok(with_backing!(kind, T => {
        let typed: Vec<T> = values.iter().map(|&v| v as T).collect();
        TensorArgument::from_vec(typed, dims)
    }))
}
