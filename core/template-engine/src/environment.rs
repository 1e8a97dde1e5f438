//! FILENAME: core/template-engine/src/environment.rs
//! PURPOSE: Evaluates cell expressions and renders cell templates.
//! CONTEXT: The sheet renderer talks to the evaluator only through the
//! `ExpressionEvaluator` trait. `Environment` is the default implementation,
//! backed by a `minijinja::Environment` with the spreadsheet filters from
//! `filters` registered on top of the minijinja built-ins.
//!
//! UNDEFINED NAMES:
//! With `strict_undefined` (the default) minijinja runs with
//! `UndefinedBehavior::Strict`, and an expression that evaluates to, or fails
//! on, an undefined value raises `EvalError::Undefined`. Otherwise undefined
//! values render as empty text and write empty cells. `is defined` and the
//! `default` filter work in both modes.

use minijinja::value::Rest;
use minijinja::{AutoEscape, ErrorKind, UndefinedBehavior};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::EvalError;
use crate::filters;
use crate::value::Value;

/// The evaluator contract used by the sheet renderer.
pub trait ExpressionEvaluator {
    /// Evaluates a single expression to a typed value.
    fn eval(&self, expression: &str, context: &Context) -> Result<Value, EvalError>;

    /// Renders mixed text with `{{ }}` substitutions to a string.
    fn render_template(&self, text: &str, context: &Context) -> Result<String, EvalError>;
}

/// Evaluator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentOptions {
    /// Raise on unknown names instead of yielding an undefined value.
    pub strict_undefined: bool,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        EnvironmentOptions {
            strict_undefined: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Environment {
    options: EnvironmentOptions,
    jinja: minijinja::Environment<'static>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::with_options(EnvironmentOptions::default())
    }
}

impl Environment {
    /// Creates an environment with strict undefined handling.
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn with_options(options: EnvironmentOptions) -> Self {
        let mut jinja = minijinja::Environment::new();
        jinja.set_undefined_behavior(undefined_behavior(options.strict_undefined));
        // Cells hold plain text, never markup.
        jinja.set_auto_escape_callback(|_| AutoEscape::None);
        jinja.add_filter("date", filters::date);
        jinja.add_filter("number_format", filters::number_format);

        Environment { options, jinja }
    }

    pub fn options(&self) -> &EnvironmentOptions {
        &self.options
    }

    pub fn set_strict_undefined(&mut self, strict: bool) {
        self.options.strict_undefined = strict;
        self.jinja.set_undefined_behavior(undefined_behavior(strict));
    }

    /// Registers a filter. A custom filter replaces a built-in of the same name.
    pub fn add_filter<F>(&mut self, name: impl Into<String>, filter: F)
    where
        F: Fn(&Value, &[Value]) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    {
        self.jinja.add_filter(name.into(), move |value: Value, args: Rest<Value>| {
            filter(&value, &args.0)
        });
    }

    /// The underlying minijinja environment, for globals and tests.
    pub fn jinja_mut(&mut self) -> &mut minijinja::Environment<'static> {
        &mut self.jinja
    }
}

impl ExpressionEvaluator for Environment {
    fn eval(&self, expression: &str, context: &Context) -> Result<Value, EvalError> {
        let undefined = || EvalError::Undefined(expression.trim().to_string());

        let compiled = self.jinja.compile_expression_owned(expression.to_string())?;
        let value = compiled
            .eval(context.to_value())
            .map_err(|err| match err.kind() {
                ErrorKind::UndefinedError => undefined(),
                _ => EvalError::Jinja(err),
            })?;

        if value.is_undefined() && self.options.strict_undefined {
            return Err(undefined());
        }
        Ok(value)
    }

    fn render_template(&self, text: &str, context: &Context) -> Result<String, EvalError> {
        Ok(self.jinja.render_str(text, context.to_value())?)
    }
}

fn undefined_behavior(strict: bool) -> UndefinedBehavior {
    if strict {
        UndefinedBehavior::Strict
    } else {
        UndefinedBehavior::Lenient
    }
}
