use crate::action::Action;
use crate::path::{PathTemplate, Segment};

/// Derives the dotted name of a route from its path.
///
/// Every placeholder is removed, including placeholders that come from a
/// prefix, and the remaining segments are joined with `.`. The action slug is
/// appended unless it is empty or the name already ends with it.
///
/// Returns `None` if both the remaining path and the slug are empty.
///
/// ```
/// use autoroute::name::route_name;
/// use autoroute::path::PathTemplate;
/// use autoroute::{Action, Config, ControllerDescriptor, MethodDescriptor};
///
/// let config = Config::new();
/// let users = ControllerDescriptor::new("UsersController")
///     .method(MethodDescriptor::new("show").untyped("id"));
/// let show = &users.methods()[0];
/// let params: Vec<_> = show.parameters().iter().collect();
///
/// let action = Action::resolve(show.name(), &users, &config);
/// let path = PathTemplate::build(&users, &action, &params, &config);
///
/// assert_eq!(route_name(&path, &action).as_deref(), Some("users.show"));
/// ```
///
pub fn route_name(path: &PathTemplate, action: &Action) -> Option<String> {
    let segments = path.segments().iter().filter_map(|segment| match segment {
        Segment::Literal(literal) => Some(literal.as_str()),
        Segment::Param(_) => None,
    });

    let mut name = segments.collect::<Vec<_>>().join(".");
    let slug = action.slug();

    if !slug.is_empty() && !name.ends_with(slug) {
        if !name.is_empty() {
            name.push('.');
        }

        name.push_str(slug);
    }

    if name.is_empty() { None } else { Some(name) }
}
