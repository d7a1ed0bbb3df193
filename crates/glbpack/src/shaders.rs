//! Built-in shader sources used by the shader-override mode.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

/// Default vertex shader. The text is byte-for-byte fixed, header comment,
/// trailing whitespace and all: consumers compare packed output against
/// files produced by earlier versions of the tool.
pub const VERTEX_SOURCE: &str = "// Create VS

precision highp float;

attribute vec3 a_position;
attribute vec3 a_normal;
attribute vec3 a_batchId;
varying vec3 v_normal;
uniform mat4 u_modelViewMatrix;
uniform mat4 u_projectionMatrix;
uniform mat3 u_normalMatrix;

void main(void) {
  v_normal = u_normalMatrix * a_normal;

  vec4 pos;
  pos = u_modelViewMatrix * vec4(a_position,1.0);
  gl_Position = u_projectionMatrix * pos;
}

";

/// Default fragment shader. Byte-for-byte fixed like [`VERTEX_SOURCE`].
pub const FRAGMENT_SOURCE: &str = "// Create FS

precision highp float;
uniform vec4 u_ambient;
uniform vec4 u_diffuse;
uniform vec4 u_emission;
uniform vec4 u_specular;
uniform float u_shininess;
uniform float u_transparency;\x20

varying vec3 v_position;
varying vec3 v_normal;

void main(void) {
vec3 normal = normalize(v_normal);
if (gl_FrontFacing == false) normal = -normal;
vec4 color = vec4(0., 0., 0., 0.);
vec4 diffuse = vec4(0., 0., 0., 1.);
vec3 diffuseLight = vec3(0., 0., 0.);
vec4 emission;
vec4 ambient;
vec4 specular;

ambient = u_ambient;
diffuse = u_diffuse;
emission = u_emission;
specular = u_specular;

color.xyz += specular.xyz;
// brighten only
diffuse.xyz *= max(dot(normal,vec3(0.,0.,1.)), 0.);\x20
color.xyz += diffuse.xyz;
color.xyz += emission.xyz;
color = vec4(color.rgb * diffuse.a, diffuse.a * u_transparency);
gl_FragColor = color;
}
";

/// Select a built-in shader for `shader_id` and wrap it in a data URI.
///
/// The well-known IDs `d0VS` and `d0FS` map directly to the built-in
/// sources. Any other ID is matched on its `VS`/`FS` suffix; IDs matching
/// neither convention get `None` and the caller falls back to the shader's
/// original URI.
pub fn builtin_shader_uri(shader_id: &str) -> Option<String> {
    let source = match shader_id {
        "d0VS" => VERTEX_SOURCE,
        "d0FS" => FRAGMENT_SOURCE,
        other => {
            warn!(shader_id = other, "shader ID is not well known");
            if other.ends_with("VS") {
                VERTEX_SOURCE
            } else if other.ends_with("FS") {
                FRAGMENT_SOURCE
            } else {
                return None;
            }
        }
    };

    Some(format!("data:text/plain;base64,{}", STANDARD.encode(source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{fetch, MemorySource};

    #[test]
    fn test_sources_are_the_fixed_tool_text() {
        assert!(VERTEX_SOURCE.starts_with("// Create VS\n\nprecision highp float;"));
        assert!(VERTEX_SOURCE.ends_with("gl_Position = u_projectionMatrix * pos;\n}\n\n"));

        assert!(FRAGMENT_SOURCE.starts_with("// Create FS\n\nprecision highp float;"));
        // Two lines carry a trailing space.
        assert!(FRAGMENT_SOURCE.contains("uniform float u_transparency; \n"));
        assert!(FRAGMENT_SOURCE.contains("max(dot(normal,vec3(0.,0.,1.)), 0.); \n"));
        assert!(FRAGMENT_SOURCE.ends_with("gl_FragColor = color;\n}\n"));
    }

    #[test]
    fn test_well_known_ids() {
        let vs = builtin_shader_uri("d0VS").unwrap();
        let fs = builtin_shader_uri("d0FS").unwrap();
        assert!(vs.starts_with("data:text/plain;base64,"));
        assert_ne!(vs, fs);
    }

    #[test]
    fn test_suffix_fallback() {
        assert_eq!(
            builtin_shader_uri("customVS"),
            builtin_shader_uri("d0VS")
        );
        assert_eq!(
            builtin_shader_uri("customFS"),
            builtin_shader_uri("d0FS")
        );
    }

    #[test]
    fn test_unknown_id_gets_no_override() {
        assert_eq!(builtin_shader_uri("postprocess"), None);
    }

    #[test]
    fn test_uri_round_trips_through_fetch() {
        let uri = builtin_shader_uri("d0VS").unwrap();
        let bytes = fetch(&uri, &MemorySource::new()).unwrap();
        assert_eq!(bytes, VERTEX_SOURCE.as_bytes());
    }
}
