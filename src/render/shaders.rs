/// Vertex shader for the foliage point cloud
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_size;
layout(location = 2) in float a_alpha;
layout(location = 3) in vec3 a_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out float v_alpha;
out vec3 v_color;

void main() {
    v_alpha = a_alpha;
    v_color = a_color;

    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = a_size * (30.0 / -view_pos.z);
}
"#;

/// Fragment shader for the foliage point cloud
pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    float dist = length(coord);

    if (dist > 0.5) {
        discard;
    }

    // Hot centre
    float glow = 1.0 - dist * 2.0;
    vec3 color = v_color + vec3(0.1) * glow * glow;

    fragColor = vec4(color, v_alpha);
}
"#;

/// Vertex shader for instanced ornaments and the star
pub const INSTANCED_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance;
layout(location = 6) in vec3 a_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;
out vec3 v_color;

void main() {
    mat4 model = u_model * a_instance;
    vec4 world_pos = model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(model) * a_normal;
    v_color = a_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for instanced ornaments: two spot lights, a gold point
/// light under the tree and a dim ambient
pub const INSTANCED_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform float u_roughness;
uniform float u_emissive;

out vec4 fragColor;

const vec3 KEY_POS = vec3(10.0, 20.0, 10.0);
const vec3 KEY_COLOR = vec3(1.0, 0.843, 0.0) * 2.0;
const vec3 FILL_POS = vec3(-10.0, 20.0, -10.0);
const vec3 FILL_COLOR = vec3(1.0) * 1.0;
const vec3 AMBIENT = vec3(0.0, 0.25, 0.125) * 0.2;
const vec3 UNDER_POS = vec3(0.0, -5.0, 0.0);
const vec3 UNDER_COLOR = vec3(0.831, 0.686, 0.216) * 2.0;
const float UNDER_RANGE = 10.0;

vec3 spot(vec3 light_pos, vec3 light_color, vec3 normal, vec3 view_dir) {
    vec3 light_dir = normalize(light_pos - v_world_position);
    float ndotl = max(dot(normal, light_dir), 0.0);

    vec3 half_dir = normalize(light_dir + view_dir);
    float shininess = mix(128.0, 8.0, u_roughness);
    float spec = pow(max(dot(normal, half_dir), 0.0), shininess);

    // Metals tint their highlights
    return light_color * (v_color * ndotl * 0.4 + v_color * spec);
}

// Reaches zero at UNDER_RANGE
vec3 under_light(vec3 normal) {
    vec3 to_light = UNDER_POS - v_world_position;
    float falloff = clamp(1.0 - length(to_light) / UNDER_RANGE, 0.0, 1.0);
    float ndotl = max(dot(normal, normalize(to_light)), 0.0);
    return UNDER_COLOR * v_color * ndotl * falloff * falloff;
}

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    vec3 color = AMBIENT * v_color;
    color += spot(KEY_POS, KEY_COLOR, normal, view_dir);
    color += spot(FILL_POS, FILL_COLOR, normal, view_dir);
    color += under_light(normal);

    float rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0);
    color += v_color * rim * 0.2;

    color += v_color * u_emissive;

    fragColor = vec4(color, 1.0);
}
"#;

/// Fullscreen quad vertex shader for post-processing
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

out vec2 v_uv;

void main() {
    // Fullscreen triangle
    float x = float((gl_VertexID & 1) << 2);
    float y = float((gl_VertexID & 2) << 1);
    v_uv = vec2(x * 0.5, y * 0.5);
    gl_Position = vec4(x - 1.0, y - 1.0, 0.0, 1.0);
}
"#;

/// Bloom extraction shader
pub const BLOOM_EXTRACT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform float u_threshold;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_texture, v_uv).rgb;
    float brightness = dot(color, vec3(0.2126, 0.7152, 0.0722));
    float weight = smoothstep(u_threshold, u_threshold + 0.1, brightness);

    fragColor = vec4(color * weight, 1.0);
}
"#;

/// Gaussian blur shader
pub const BLUR_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform vec2 u_direction;

out vec4 fragColor;

void main() {
    vec2 texel = 1.0 / vec2(textureSize(u_texture, 0));

    // 9-tap Gaussian blur
    float weights[5] = float[](0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);

    vec3 result = texture(u_texture, v_uv).rgb * weights[0];

    for (int i = 1; i < 5; i++) {
        vec2 offset = u_direction * texel * float(i) * 2.0;
        result += texture(u_texture, v_uv + offset).rgb * weights[i];
        result += texture(u_texture, v_uv - offset).rgb * weights[i];
    }

    fragColor = vec4(result, 1.0);
}
"#;

/// Final composite: scene plus bloom, darkened towards the edges
pub const COMPOSITE_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_scene;
uniform sampler2D u_bloom;
uniform float u_bloom_strength;
uniform float u_vignette_offset;
uniform float u_vignette_darkness;

out vec4 fragColor;

void main() {
    vec3 scene = texture(u_scene, v_uv).rgb;
    vec3 bloom = texture(u_bloom, v_uv).rgb;

    vec3 color = scene + bloom * u_bloom_strength;

    vec2 uv = (v_uv - 0.5) * u_vignette_offset;
    float vignette = clamp(1.0 - dot(uv, uv), 0.0, 1.0);
    color *= mix(1.0, vignette, u_vignette_darkness);

    fragColor = vec4(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 8] = [
        FOLIAGE_VERTEX_SHADER,
        FOLIAGE_FRAGMENT_SHADER,
        INSTANCED_VERTEX_SHADER,
        INSTANCED_FRAGMENT_SHADER,
        FULLSCREEN_VERTEX_SHADER,
        BLOOM_EXTRACT_SHADER,
        BLUR_SHADER,
        COMPOSITE_SHADER,
    ];

    #[test]
    fn test_shader_version() {
        for src in ALL {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_attribute_locations_match_buffers() {
        // Point buffer: position, size, alpha, color
        for attr in ["location = 0) in vec3 a_position", "location = 1) in float a_size",
                     "location = 2) in float a_alpha", "location = 3) in vec3 a_color"] {
            assert!(FOLIAGE_VERTEX_SHADER.contains(attr), "{attr}");
        }
        // Instance matrix spans locations 2..=5
        assert!(INSTANCED_VERTEX_SHADER.contains("location = 2) in mat4 a_instance"));
        assert!(INSTANCED_VERTEX_SHADER.contains("location = 6) in vec3 a_color"));
    }

    #[test]
    fn test_foliage_glow_only_brightens() {
        // Sprites stay opaque inside the disc; the glow adds colour only
        assert!(FOLIAGE_FRAGMENT_SHADER.contains("fragColor = vec4(color, v_alpha);"));
        assert!(!FOLIAGE_FRAGMENT_SHADER.contains("v_alpha * glow"));
    }

    #[test]
    fn test_gold_light_below_tree() {
        assert!(INSTANCED_FRAGMENT_SHADER.contains("UNDER_POS = vec3(0.0, -5.0, 0.0)"));
        assert!(INSTANCED_FRAGMENT_SHADER.contains("vec3(0.831, 0.686, 0.216)"));
        assert!(INSTANCED_FRAGMENT_SHADER.contains("UNDER_RANGE = 10.0"));
        assert!(INSTANCED_FRAGMENT_SHADER.contains("color += under_light(normal);"));
    }

    #[test]
    fn test_point_size_attenuation() {
        assert!(FOLIAGE_VERTEX_SHADER.contains("a_size * (30.0 / -view_pos.z)"));
    }
}
