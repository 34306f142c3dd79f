use crate::config::Config;
use crate::describe::{MethodDescriptor, ParameterDescriptor};
use crate::error::{Error, Result};

/// Returns the parameters of `method` that are bound from the path.
///
/// Parameters whose declared type is a request type, or a subtype of one,
/// are injected by the host and removed. Untyped parameters are always kept.
/// The relative order of the kept parameters is preserved.
///
/// # Errors
///
/// Returns [`Error::UnresolvedType`] if a parameter declares an unresolved
/// type that is not itself a request type.
///
pub fn path_params<'a>(
    controller: &str,
    method: &'a MethodDescriptor,
    config: &Config,
) -> Result<Vec<&'a ParameterDescriptor>> {
    let mut params = Vec::with_capacity(method.parameters().len());

    for param in method.parameters() {
        let ty = match param.ty() {
            Some(ty) => ty,
            None => {
                params.push(param);
                continue;
            }
        };

        if config.is_request_type(ty.name()) {
            continue;
        }

        let supertypes = ty.supertypes().ok_or_else(|| Error::UnresolvedType {
            controller: controller.to_owned(),
            method: method.name().to_owned(),
            parameter: param.name().to_owned(),
            ty: ty.name().to_owned(),
        })?;

        if !supertypes.iter().any(|name| config.is_request_type(name)) {
            params.push(param);
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::path_params;
    use crate::describe::{MethodDescriptor, ParameterDescriptor, TypeRef};
    use crate::{Config, Error};

    fn names(params: Vec<&ParameterDescriptor>) -> Vec<&str> {
        params.into_iter().map(ParameterDescriptor::name).collect()
    }

    #[test]
    fn removes_request_parameters() {
        let config = Config::new();
        let method = MethodDescriptor::new("show")
            .param("request", TypeRef::new("Request"))
            .untyped("id")
            .param("profile", TypeRef::new("Profile"));

        let params = path_params("UsersController", &method, &config).unwrap();

        assert_eq!(names(params), ["id", "profile"]);
    }

    #[test]
    fn removes_request_subtypes() {
        let config = Config::new();
        let method = MethodDescriptor::new("store")
            .param("form", TypeRef::resolved("StoreUser", ["FormRequest", "Request"]))
            .param("team", TypeRef::resolved("Team", ["Model"]))
            .param("count", TypeRef::new("u32"));

        let params = path_params("UsersController", &method, &config).unwrap();

        assert_eq!(names(params), ["team", "count"]);
    }

    #[test]
    fn configured_request_types() {
        let config = Config::new().request_type("HttpContext");
        let method = MethodDescriptor::new("index")
            .param("cx", TypeRef::unresolved("HttpContext"))
            .param("request", TypeRef::new("Request"));

        let params = path_params("UsersController", &method, &config).unwrap();

        assert!(params.is_empty());
    }

    #[test]
    fn unresolved_type_is_an_error() {
        let config = Config::new();
        let method = MethodDescriptor::new("show")
            .untyped("id")
            .param("ghost", TypeRef::unresolved("Ghost"));

        assert_matches!(
            path_params("UsersController", &method, &config),
            Err(Error::UnresolvedType { controller, method, parameter, ty }) => {
                assert_eq!(controller, "UsersController");
                assert_eq!(method, "show");
                assert_eq!(parameter, "ghost");
                assert_eq!(ty, "Ghost");
            }
        );
    }
}
