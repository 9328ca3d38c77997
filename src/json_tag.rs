use std::fmt;
use std::io::{
    Read,
};
use anyhow::{
    Result,
    bail,
};

use crate::peekable_codepoints::*;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum JsonTag {
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Colon,
    Comma,
    /// A quoted string (quotes and escapes kept as written) or a bare token such as `true` or `-1.5e3`.
    Literal(String),
}

impl JsonTag {
    /// Only space, tab, line feed and carriage return separate JSON tokens.
    fn is_json_whitespace(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
    }

    fn is_structural(c: char) -> bool {
        matches!(c, '{' | '}' | '[' | ']' | ',' | ':')
    }

    fn read_quoted<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<String>
        where R: Read
    {
        let start = peekable_cp.position();
        let mut end = 1;
        let mut is_escape = false;
        loop {
            match peekable_cp.peek_char(end)? {
                None => bail!("unterminated string starting at char {}", start),
                Some(c) => {
                    end += 1;
                    match c {
                        _ if is_escape => is_escape = false,
                        '\\' => is_escape = true,
                        '"' => break,
                        _ => (),
                    }
                }
            }
        }

        peekable_cp.pop(end)
    }

    fn read_bare<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<String>
        where R: Read
    {
        let mut end = 0;
        while let Some(c) = peekable_cp.peek_char(end)? {
            if JsonTag::is_json_whitespace(c) || c == '"' || JsonTag::is_structural(c) {
                break;
            }
            end += 1;
        }

        peekable_cp.pop(end)
    }

    pub fn read_json_tag<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<Option<JsonTag>>
        where R: Read
    {
        let json_tag =
            loop {
                match peekable_cp.peek_char(0)? {
                    None => break None,
                    Some(c) => {
                        match c {
                            c if JsonTag::is_json_whitespace(c) => {
                                peekable_cp.skip(1)?;
                                continue;
                            }
                            '{' => break Some(JsonTag::LeftCurly),
                            '}' => break Some(JsonTag::RightCurly),
                            '[' => break Some(JsonTag::LeftSquare),
                            ']' => break Some(JsonTag::RightSquare),
                            ',' => break Some(JsonTag::Comma),
                            ':' => break Some(JsonTag::Colon),
                            '"' => {
                                let literal = JsonTag::read_quoted(peekable_cp)?;
                                return Ok(Some(JsonTag::Literal(literal)));
                            }
                            _ => {
                                let literal = JsonTag::read_bare(peekable_cp)?;
                                return Ok(Some(JsonTag::Literal(literal)));
                            }
                        }
                    }
                }
            };

        if json_tag.is_some() {
            peekable_cp.skip(1)?;
        }

        Ok(json_tag)
    }

    pub fn parse<R>(reader: R) -> Result<Vec<JsonTag>>
        where R: Read
    {
        let mut json_tag_list = Vec::new();
        let mut peekable_cp = PeekableCodePoints::new(reader);
        while let Some(json_tag) = JsonTag::read_json_tag(&mut peekable_cp)? {
            json_tag_list.push(json_tag);
        }

        Ok(json_tag_list)
    }
}

impl fmt::Display for JsonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonTag::LeftCurly => f.write_str("{"),
            JsonTag::RightCurly => f.write_str("}"),
            JsonTag::LeftSquare => f.write_str("["),
            JsonTag::RightSquare => f.write_str("]"),
            JsonTag::Colon => f.write_str(":"),
            JsonTag::Comma => f.write_str(","),
            JsonTag::Literal(literal) => f.write_str(literal),
        }
    }
}

#[cfg(test)]
mod json_tag_tests {
    use super::*;

    fn lit(s: &str) -> JsonTag {
        JsonTag::Literal(String::from(s))
    }

    #[test]
    fn test_one_line() -> Result<()> {
        let json = r#"{"simple": 123, "array": ["a", "b", "c\""], "object": {"prop": "{true]"}}"#;
        let json_tag_list = JsonTag::parse(json.as_bytes())?;
        assert_eq!(
            json_tag_list,
            vec![
                // {
                JsonTag::LeftCurly,

                // "simple": 123
                lit(r#""simple""#), JsonTag::Colon, lit("123"),

                // ,
                JsonTag::Comma,

                // "array": ["a", "b", "c\""]
                lit(r#""array""#),
                JsonTag::Colon,
                JsonTag::LeftSquare,
                lit(r#""a""#), JsonTag::Comma, lit(r#""b""#), JsonTag::Comma, lit(r#""c\"""#),
                JsonTag::RightSquare,

                // ,
                JsonTag::Comma,

                // "object": {"prop": "{true]"}
                lit(r#""object""#),
                JsonTag::Colon,
                JsonTag::LeftCurly,
                lit(r#""prop""#), JsonTag::Colon, lit(r#""{true]""#),
                JsonTag::RightCurly,

                // }
                JsonTag::RightCurly,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_multi_line() -> Result<()> {
        let json = r#"
{
    "flag": true,
    "nothing": null,
    "list": [
        -1.5e3,
        "µ\\"
    ]
}"#;
        let json_tag_list = JsonTag::parse(json.as_bytes())?;
        assert_eq!(
            json_tag_list,
            vec![
                JsonTag::LeftCurly,
                lit(r#""flag""#), JsonTag::Colon, lit("true"),
                JsonTag::Comma,
                lit(r#""nothing""#), JsonTag::Colon, lit("null"),
                JsonTag::Comma,
                lit(r#""list""#),
                JsonTag::Colon,
                JsonTag::LeftSquare,
                lit("-1.5e3"), JsonTag::Comma, lit(r#""µ\\""#),
                JsonTag::RightSquare,
                JsonTag::RightCurly,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_bare_literal_stops_at_quote() -> Result<()> {
        let json_tag_list = JsonTag::parse(r#"true"x""#.as_bytes())?;
        assert_eq!(json_tag_list, vec![lit("true"), lit(r#""x""#)]);
        Ok(())
    }

    #[test]
    fn test_only_json_whitespace_separates_tags() -> Result<()> {
        let json_tag_list = JsonTag::parse("[1,\u{a0}2\u{2003}]".as_bytes())?;
        assert_eq!(
            json_tag_list,
            vec![
                JsonTag::LeftSquare,
                lit("1"), JsonTag::Comma, lit("\u{a0}2\u{2003}"),
                JsonTag::RightSquare,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_unterminated_string() {
        let result = JsonTag::parse(r#"{"open: 1}"#.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let tags = [JsonTag::LeftSquare, lit("1"), JsonTag::Comma, lit("2"), JsonTag::RightSquare];
        let text: String = tags.iter().map(|t| t.to_string()).collect();
        assert_eq!(text, "[1,2]");
    }
}
