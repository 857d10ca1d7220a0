//! GLSL 1.50 sources for the map quad.

pub const POSITION_ATTRIBUTE: &str = "position";
pub const UV_ATTRIBUTE: &str = "vertexUV";
pub const COLOR_OUTPUT: &str = "outColor";

pub const MAP_SAMPLER: &str = "mapTexture";
pub const PLAYER_POS_UNIFORM: &str = "playerPos";
pub const LOOK_DIR_UNIFORM: &str = "lookDir";

pub const QUAD_VERT: &str = r#"#version 150 core

in vec2 position;
in vec2 vertexUV;

out vec2 UV;

void main()
{
    UV = vertexUV;
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

// playerPos and lookDir are declared but not read yet
pub const MAP_FRAG: &str = r#"#version 150 core

in vec2 UV;

uniform sampler2D mapTexture;
uniform vec2 lookDir;
uniform vec2 playerPos;

out vec4 outColor;

void main()
{
    outColor = texture(mapTexture, UV);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_declare_interface() {
        assert!(QUAD_VERT.starts_with("#version 150 core\n"));
        assert!(MAP_FRAG.starts_with("#version 150 core\n"));

        for name in [POSITION_ATTRIBUTE, UV_ATTRIBUTE] {
            assert!(QUAD_VERT.contains(&format!("in vec2 {name};")));
        }

        assert!(MAP_FRAG.contains(&format!("uniform sampler2D {MAP_SAMPLER};")));
        assert!(MAP_FRAG.contains(&format!("uniform vec2 {PLAYER_POS_UNIFORM};")));
        assert!(MAP_FRAG.contains(&format!("uniform vec2 {LOOK_DIR_UNIFORM};")));
        assert!(MAP_FRAG.contains(&format!("out vec4 {COLOR_OUTPUT};")));
    }

    #[test]
    fn fragment_only_samples_map() {
        let body = MAP_FRAG.split("void main()").nth(1).unwrap();

        assert!(body.contains("texture(mapTexture, UV)"));
        assert!(!body.contains(PLAYER_POS_UNIFORM));
        assert!(!body.contains(LOOK_DIR_UNIFORM));
    }

    #[test]
    fn no_nul_bytes() {
        assert!(!QUAD_VERT.contains('\0'));
        assert!(!MAP_FRAG.contains('\0'));
    }
}
