//! Argument construction for tool invocations
//!
//! Arguments are always built as an ordered vector. Quoting only happens in
//! `render_command_line`, which produces the copy-pasteable line shown in
//! failure reports; the process layer passes the vector through untouched.

use std::path::PathBuf;

/// Verbosity passed to every restore/build/run/publish step
pub const VERBOSITY: [&str; 2] = ["-v", "n"];

const NO_CACHE: &str = "--no-cache";

/// The fixed `-v n` pair as owned strings
pub fn verbosity_args() -> Vec<String> {
    VERBOSITY.iter().map(|s| s.to_string()).collect()
}

/// Ordered MSBuild property overrides (`/p:Key=Value`)
///
/// Entries without a value are kept in declaration order but never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOverrides {
    entries: Vec<(String, Option<String>)>,
}

impl PropertyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property; `None` keeps the slot but emits nothing
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// Append another set after this one, later declarations overriding earlier ones
    pub fn extend(&mut self, other: &PropertyOverrides) {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| format!("/p:{}={}", k, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_none())
    }
}

/// Options for a `restore` invocation
#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    pub runtime: Option<String>,
    pub sources: Vec<String>,
    pub packages_dir: Option<PathBuf>,
    pub properties: PropertyOverrides,
}

impl RestoreOptions {
    pub fn with_runtime(mut self, rid: impl Into<String>) -> Self {
        self.runtime = Some(rid.into());
        self
    }

    pub fn with_properties(mut self, extra: &PropertyOverrides) -> Self {
        self.properties.extend(extra);
        self
    }

    /// Arguments following the `restore` subcommand
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(ref rid) = self.runtime {
            args.push("-r".to_string());
            args.push(rid.clone());
        }

        args.push(NO_CACHE.to_string());
        args.extend(verbosity_args());

        if let Some(ref dir) = self.packages_dir {
            args.push("--packages".to_string());
            args.push(dir.display().to_string());
        }

        for source in &self.sources {
            args.push("--source".to_string());
            args.push(source.clone());
        }

        args.extend(self.properties.to_args());
        args
    }
}

/// Arguments for `publish -r <rid> -o <dir>` plus property overrides
pub fn publish_args(rid: &str, output_dir: &std::path::Path, props: &PropertyOverrides) -> Vec<String> {
    let mut args = vec![
        "-r".to_string(),
        rid.to_string(),
        "-o".to_string(),
        output_dir.display().to_string(),
    ];
    args.extend(props.to_args());
    args
}

/// Ordered values of every `--source` in an argument vector
pub fn sources_in<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.windows(2)
        .filter(|pair| pair[0].as_ref() == "--source")
        .map(|pair| pair[1].as_ref().to_string())
        .collect()
}

fn needs_quotes(token: &str) -> bool {
    token.is_empty() || token.chars().any(|c| c.is_whitespace() || c == '"')
}

fn quote(token: &str) -> String {
    if !needs_quotes(token) {
        return token.to_string();
    }

    // Backslash runs are literal except before a quote, where they double
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for c in token.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            c => {
                quoted.extend(std::iter::repeat('\\').take(backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    quoted.extend(std::iter::repeat('\\').take(backslashes * 2));
    quoted.push('"');
    quoted
}

/// Join a program and its arguments into a single shell-style line
pub fn render_command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(quote(program))
        .chain(args.iter().map(|a| quote(a.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a line produced by `render_command_line` back into tokens
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                let mut backslashes = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    backslashes += 1;
                }
                if chars.peek() == Some(&'"') {
                    current.extend(std::iter::repeat('\\').take(backslashes / 2));
                    if backslashes % 2 == 1 {
                        current.push('"');
                        chars.next();
                    }
                } else {
                    current.extend(std::iter::repeat('\\').take(backslashes));
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
