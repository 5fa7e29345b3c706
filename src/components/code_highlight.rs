use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// TypeScript/JavaScript keywords that should be highlighted
const KEYWORDS: &[&str] = &[
    "import",
    "export",
    "from",
    "default",
    "function",
    "return",
    "const",
    "let",
    "var",
    "if",
    "else",
    "for",
    "while",
    "switch",
    "case",
    "break",
    "new",
    "class",
    "extends",
    "implements",
    "interface",
    "type",
    "as",
    "async",
    "await",
    "typeof",
    "keyof",
    "in",
    "of",
    "this",
    "true",
    "false",
    "null",
    "undefined",
];

/// Token types for TS/JS syntax
#[derive(Debug, PartialEq, Clone)]
enum Token {
    Keyword(String),
    String(String),
    Number(String),
    Comment(String),
    Identifier(String),
    Whitespace(String),
    Punctuation(String),
}

fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '<'
            | '>'
            | ','
            | ';'
            | ':'
            | '.'
            | '='
            | '+'
            | '-'
            | '*'
            | '/'
            | '%'
            | '!'
            | '?'
            | '&'
            | '|'
    )
}

/// Simple TS/JS tokenizer, also good enough for JSX
fn tokenize(code: &str) -> Vec<Token> {
    let chars: Vec<char> = code.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(classify_word(current));
            current.clear();
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();
        match ch {
            // String and template literals
            '\'' | '"' | '`' => {
                flush(&mut current, &mut tokens);
                let start = i;
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\\' {
                        i += 2;
                        continue;
                    }
                    i += 1;
                    if chars[i - 1] == ch {
                        break;
                    }
                }
                let end = i.min(chars.len());
                tokens.push(Token::String(chars[start..end].iter().collect()));
            }
            // Line comments
            '/' if next == Some('/') => {
                flush(&mut current, &mut tokens);
                let start = i;
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                tokens.push(Token::Comment(chars[start..i].iter().collect()));
            }
            // Block comments
            '/' if next == Some('*') => {
                flush(&mut current, &mut tokens);
                let start = i;
                i += 2;
                while i < chars.len() && !(chars[i - 1] == '*' && chars[i] == '/' && i > start + 2) {
                    i += 1;
                }
                i = (i + 1).min(chars.len());
                tokens.push(Token::Comment(chars[start..i].iter().collect()));
            }
            c if c.is_whitespace() => {
                flush(&mut current, &mut tokens);
                let start = i;
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                tokens.push(Token::Whitespace(chars[start..i].iter().collect()));
            }
            c if is_punctuation(c) => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Punctuation(c.to_string()));
                i += 1;
            }
            c => {
                current.push(c);
                i += 1;
            }
        }
    }

    flush(&mut current, &mut tokens);
    tokens
}

/// Classify a word as keyword, number, or identifier
fn classify_word(word: &str) -> Token {
    if KEYWORDS.contains(&word) {
        Token::Keyword(word.to_string())
    } else if word.starts_with(|c: char| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '_')
    {
        Token::Number(word.to_string())
    } else {
        Token::Identifier(word.to_string())
    }
}

/// Whether a file name looks like TS/JS source
pub fn is_script(file_name: &str) -> bool {
    matches!(
        file_name.rsplit('.').next(),
        Some("ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs")
    )
}

fn token_style(token: Token) -> (Style, String) {
    match token {
        Token::Keyword(s) => (
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            s,
        ),
        Token::String(s) => (Style::default().fg(Color::Green), s),
        Token::Number(s) => (Style::default().fg(Color::Yellow), s),
        Token::Comment(s) => (Style::default().fg(Color::DarkGray), s),
        Token::Identifier(s) => {
            // Components and types are capitalized
            let style = if s.starts_with(|c: char| c.is_ascii_uppercase()) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            (style, s)
        }
        Token::Whitespace(s) => (Style::default(), s),
        Token::Punctuation(s) => (Style::default().fg(Color::Gray), s),
    }
}

/// Convert source code into highlighted ratatui Lines
///
/// Non-script files are returned unstyled.
pub fn highlight_code(code: &str, file_name: &str) -> Vec<Line<'static>> {
    if !is_script(file_name) {
        let lines: Vec<Line<'static>> = code.lines().map(|l| Line::from(l.to_string())).collect();
        return if lines.is_empty() {
            vec![Line::from("")]
        } else {
            lines
        };
    }

    let mut lines = Vec::new();
    let mut current_line_spans = Vec::new();

    for token in tokenize(code) {
        let (style, text) = token_style(token);

        // Split by newlines to create proper Lines
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current_line_spans)));
            }
            if !part.is_empty() {
                current_line_spans.push(Span::styled(part.to_string(), style));
            }
        }
    }

    if !current_line_spans.is_empty() {
        lines.push(Line::from(current_line_spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_import() {
        let tokens = tokenize("import { Button } from \"./button\"");

        assert_eq!(tokens[0], Token::Keyword("import".to_string()));
        assert_eq!(tokens[1], Token::Whitespace(" ".to_string()));
        assert_eq!(tokens[2], Token::Punctuation("{".to_string()));
        assert_eq!(tokens[4], Token::Identifier("Button".to_string()));
        assert_eq!(tokens[8], Token::Keyword("from".to_string()));
        assert_eq!(tokens[10], Token::String("\"./button\"".to_string()));
    }

    #[test]
    fn test_tokenize_escaped_quote() {
        let tokens = tokenize(r#"const s = 'it\'s'"#);
        assert_eq!(tokens.last(), Some(&Token::String(r#"'it\'s'"#.to_string())));
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        let tokens = tokenize("const s = \"open");
        assert_eq!(tokens.last(), Some(&Token::String("\"open".to_string())));
    }

    #[test]
    fn test_tokenize_comments() {
        let tokens = tokenize("a // note\n/* block */ b");
        assert_eq!(tokens[2], Token::Comment("// note".to_string()));
        assert_eq!(tokens[4], Token::Comment("/* block */".to_string()));
        assert_eq!(tokens[6], Token::Identifier("b".to_string()));
    }

    #[test]
    fn test_tokenize_number() {
        let tokens = tokenize("x = 1_000");
        assert_eq!(tokens[4], Token::Number("1_000".to_string()));
    }

    #[test]
    fn test_highlight_keeps_line_count() {
        let code = "export function A() {\n  return <div />\n}";
        assert_eq!(highlight_code(code, "a.tsx").len(), 3);
    }

    #[test]
    fn test_non_script_is_plain() {
        let lines = highlight_code("body { color: red }", "globals.css");
        assert_eq!(lines.len(), 1);
        assert!(!is_script("globals.css"));
        assert!(is_script("page.tsx"));
    }
}
