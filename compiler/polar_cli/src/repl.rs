use polar::{compile, render_snippet, CompiledExpression};
use polar_ast::AstPrinter;

const HELP: &[&str] = &[
    "commands: :help, :quit, :theta <value>, :eval [theta], :ast, :formula",
    "any other input is compiled as the new r(theta) formula",
];

/// State of an interactive session: the active formula and the current θ.
#[derive(Debug, Default)]
pub struct ReplSession {
    active: Option<CompiledExpression>,
    theta: f64,
}

impl ReplSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &'static str {
        if self.active.is_some() {
            "polar> "
        } else {
            "polar (no formula)> "
        }
    }

    pub fn active(&self) -> Option<&CompiledExpression> {
        self.active.as_ref()
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Handle one line of input, returning the lines to print and whether
    /// the session should end.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }
        (self.submit_formula(trimmed), false)
    }

    fn handle_command(&mut self, command: &str) -> (Vec<String>, bool) {
        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        let out = match name {
            ":help" | ":h" => HELP.iter().map(|line| line.to_string()).collect(),
            ":quit" | ":q" | ":exit" => return (Vec::new(), true),
            ":theta" => match argument.parse::<f64>() {
                Ok(theta) => {
                    self.theta = theta;
                    let mut out = vec![format!("theta = {theta}")];
                    out.push(self.evaluate_active());
                    out
                }
                Err(_) => vec!["error: usage: :theta <number>".to_string()],
            },
            ":eval" if argument.is_empty() => vec![self.evaluate_active()],
            ":eval" => match argument.parse::<f64>() {
                Ok(theta) => vec![self.evaluate_at(theta)],
                Err(_) => vec!["error: usage: :eval [theta]".to_string()],
            },
            ":ast" => match &self.active {
                Some(active) => AstPrinter::new()
                    .print(active.ast())
                    .lines()
                    .map(str::to_string)
                    .collect(),
                None => vec![no_formula()],
            },
            ":formula" => match &self.active {
                Some(active) => vec![format!("{} => {active}", active.source())],
                None => vec![no_formula()],
            },
            _ => vec![format!("error: unknown command '{command}'")],
        };
        (out, false)
    }

    fn submit_formula(&mut self, source: &str) -> Vec<String> {
        match compile(source) {
            Ok(compiled) => {
                self.active = Some(compiled);
                vec![self.evaluate_active()]
            }
            Err(error) => {
                let mut out: Vec<String> = render_snippet(&error.diagnostic(source), source)
                    .lines()
                    .map(str::to_string)
                    .collect();
                if let Some(active) = &self.active {
                    out.push(format!("note: keeping previous formula '{}'", active.source()));
                }
                out
            }
        }
    }

    fn evaluate_active(&self) -> String {
        self.evaluate_at(self.theta)
    }

    fn evaluate_at(&self, theta: f64) -> String {
        match &self.active {
            Some(active) => match active.try_evaluate(theta) {
                Ok(value) => format!("r({theta}) = {value}"),
                Err(error) => format!("error: {error}"),
            },
            None => no_formula(),
        }
    }
}

fn no_formula() -> String {
    "no formula yet; type one, e.g. 100*sin(3*theta)".to_string()
}
