use autoroute_table::Verbs;
use heck::ToKebabCase;

use crate::config::Config;
use crate::convention::{crud_action, verb_prefix};
use crate::describe::ControllerDescriptor;

/// The verbs and path suffix inferred from a method name.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Action {
    verbs: Verbs,
    slug: String,
    append: bool,
}

impl Action {
    /// Resolves the action of the method `name` of `controller`.
    ///
    /// The first matching rule wins:
    ///
    /// 1. A method named exactly like a CRUD action, or one of its aliases,
    ///    uses the verb from the convention table. The slug is appended to the
    ///    path only if the table requires a suffix.
    /// 2. A `<verb>-<rest>` name uses `<verb>` and appends `<rest>`.
    /// 3. The invoke method uses the verbs declared by the controller's
    ///    `method` attribute, or GET. Its slug is empty.
    /// 4. Anything else is a GET that appends the kebab-case name.
    ///
    /// Suffixes are never appended to the routes of an invokable controller.
    ///
    pub fn resolve(name: &str, controller: &ControllerDescriptor, config: &Config) -> Self {
        let invokable = controller.is_invokable(config);
        let slug = name.to_kebab_case();

        let mut action = if let Some(crud) = crud_action(name) {
            Self {
                verbs: crud.verb,
                append: crud.suffix,
                slug,
            }
        } else if let Some((verb, rest)) = verb_prefix(&slug) {
            Self {
                verbs: verb,
                append: true,
                slug: rest.to_owned(),
            }
        } else if name == config.invoke_name() {
            Self {
                verbs: entrypoint_verbs(controller),
                append: false,
                slug: String::new(),
            }
        } else {
            Self {
                verbs: Verbs::GET,
                append: true,
                slug,
            }
        };

        if invokable {
            action.append = false;
        }

        action
    }

    pub fn verbs(&self) -> Verbs {
        self.verbs
    }

    /// The kebab-case action name. Empty for the invoke method.
    ///
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the path suffix, if the slug is appended to the path.
    ///
    pub fn suffix(&self) -> Option<&str> {
        if self.append && !self.slug.is_empty() {
            Some(&self.slug)
        } else {
            None
        }
    }
}

fn entrypoint_verbs(controller: &ControllerDescriptor) -> Verbs {
    let declared = match &controller.declared_attributes().method {
        Some(declared) if !declared.trim().is_empty() => declared,
        _ => return Verbs::GET,
    };

    match Verbs::parse_list(&declared.to_lowercase()) {
        Some(verbs) => verbs,
        None => {
            tracing::warn!(
                controller = %controller.type_name(),
                method = %declared,
                "unrecognized verb in method attribute; routing with GET"
            );

            Verbs::GET
        }
    }
}
