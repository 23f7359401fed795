//! Built-in challenge catalogue

use serde::Serialize;

/// One VimGolf-style challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GolfProblem {
    /// Challenge identifier
    pub id: &'static str,
    /// Short title
    pub title: &'static str,
    /// What the transformation does
    pub description: &'static str,
    /// Buffer text before the keystrokes
    pub start_text: &'static str,
    /// Buffer text the keystrokes must produce
    pub end_text: &'static str,
}

impl GolfProblem {
    /// `start_text` split into buffer lines
    #[must_use]
    pub fn start_lines(&self) -> Vec<String> {
        self.start_text.split('\n').map(str::to_string).collect()
    }
}

/// The ten built-in challenges
pub const PROBLEMS: &[GolfProblem] = &[
    GolfProblem {
        id: "9v00669b3ff1",
        title: "Rearrange array to single level",
        description: "Flatten nested array structure and remove empty elements",
        start_text: "[[1,2],[3,4,[]],[5,6,[7,8]]]",
        end_text: "[1,2,3,4,5,6,7,8]",
    },
    GolfProblem {
        id: "9v00680e54330",
        title: "Create json from a .env file",
        description: "Convert environment variables to JSON format",
        start_text: "API_KEY=abc123\nDATABASE_URL=postgres://localhost\nDEBUG=true",
        end_text: "{\n  \"API_KEY\": \"abc123\",\n  \"DATABASE_URL\": \"postgres://localhost\",\n  \"DEBUG\": \"true\"\n}",
    },
    GolfProblem {
        id: "9v0067a47b9200",
        title: "Reordering properties",
        description: "Sort CSS properties by line length",
        start_text: "color: red;\nbackground-color: blue;\nmargin: 10px;\npadding-top: 5px;",
        end_text: "margin: 10px;\ncolor: red;\npadding-top: 5px;\nbackground-color: blue;",
    },
    GolfProblem {
        id: "9v00674f1bfb00",
        title: "YAML to dotenv",
        description: "Convert YAML configuration to .env format",
        start_text: "database:\n  host: localhost\n  port: 5432\napi:\n  key: secret",
        end_text: "DATABASE_HOST=localhost\nDATABASE_PORT=5432\nAPI_KEY=secret",
    },
    GolfProblem {
        id: "9v0067255515",
        title: "Nested JSON Flattener",
        description: "Transform deeply nested JSON to dot-notation",
        start_text: r#"{"user": {"name": "John", "settings": {"theme": "dark"}}}"#,
        end_text: r#"{"user.name": "John", "user.settings.theme": "dark"}"#,
    },
    GolfProblem {
        id: "9v0066d89856",
        title: "Fix timezone format",
        description: "Add 'T' and 'Z' to datetime strings",
        start_text: "2023-10-15 14:30:00\n2023-10-16 09:15:30",
        end_text: "2023-10-15T14:30:00Z\n2023-10-16T09:15:30Z",
    },
    GolfProblem {
        id: "9v0067056336",
        title: "Change class fields from camel case to snake case",
        description: "Convert camelCase variable names to snake_case",
        start_text: "firstName = 'John'\nlastName = 'Doe'\nphoneNumber = '555-1234'",
        end_text: "first_name = 'John'\nlast_name = 'Doe'\nphone_number = '555-1234'",
    },
    GolfProblem {
        id: "9v0066dd4c36",
        title: "Markdown Blog Editing",
        description: "Convert link text to markdown link format",
        start_text: "Visit our website at https://example.com for more info.\nCheck out https://github.com/user/repo for the code.",
        end_text: "Visit our website at [https://example.com](https://example.com) for more info.\nCheck out [https://github.com/user/repo](https://github.com/user/repo) for the code.",
    },
    GolfProblem {
        id: "9v0066cbb6a1",
        title: "Remove adjacent duplicates",
        description: "Remove consecutive repeated characters",
        start_text: "aabbccddee\nhhellooo wwoorlld",
        end_text: "abcde\nhelo world",
    },
    GolfProblem {
        id: "9v0066daede5",
        title: "Word completion",
        description: "Complete abbreviated words with full versions",
        start_text: "func main() {\n    var msg str = \"Hello\"\n    fmt.Println(msg)\n}",
        end_text: "function main() {\n    var message string = \"Hello\"\n    fmt.Println(message)\n}",
    },
];

/// Look up a built-in challenge by id
#[must_use]
pub fn find_problem(id: &str) -> Option<&'static GolfProblem> {
    PROBLEMS.iter().find(|p| p.id == id)
}
