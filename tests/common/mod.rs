#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tessa::renderer::Renderer;
use tessa::renderer::config::RenderConfig;
use tessa::renderer::contexts::device_ctx::RecordingDevice;

/// Every test program in one file. QUAD reads locations 0 and 1, MESH and
/// MESH_TINTED read 0, 1 and 2. UNUSED_INPUT declares location 5 without reading it.
pub const SHADERS: &str = r#"
#ifdef QUAD
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec2 aTexCoord;
layout(location = 0) out vec2 vTexCoord;
void main() {
    vTexCoord = aTexCoord;
    gl_Position = vec4(aPosition, 1.0);
}
#endif
#ifdef FRAGMENT
layout(location = 0) in vec2 vTexCoord;
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(vTexCoord, 0.0, 1.0);
}
#endif
#endif

#ifdef MESH
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec3 aNormal;
layout(location = 2) in vec2 aTexCoord;
layout(location = 0) out vec2 vTexCoord;
layout(location = 1) out vec3 vNormal;
void main() {
    vTexCoord = aTexCoord;
    vNormal = aNormal;
    gl_Position = vec4(aPosition, 1.0);
}
#endif
#ifdef FRAGMENT
layout(location = 0) in vec2 vTexCoord;
layout(location = 1) in vec3 vNormal;
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(vNormal * 0.5 + 0.5, vTexCoord.x);
}
#endif
#endif

#ifdef MESH_TINTED
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec3 aNormal;
layout(location = 2) in vec2 aTexCoord;
layout(location = 0) out vec3 vTint;
void main() {
    vTint = aNormal + vec3(aTexCoord, 0.0);
    gl_Position = vec4(aPosition * 0.5, 1.0);
}
#endif
#ifdef FRAGMENT
layout(location = 0) in vec3 vTint;
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(vTint, 1.0);
}
#endif
#endif

#ifdef UNUSED_INPUT
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec2 aTexCoord;
layout(location = 5) in vec3 aUnused;
layout(location = 0) out vec2 vTexCoord;
void main() {
    vTexCoord = aTexCoord;
    gl_Position = vec4(aPosition, 1.0);
}
#endif
#ifdef FRAGMENT
layout(location = 0) in vec2 vTexCoord;
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(vTexCoord, 0.0, 1.0);
}
#endif
#endif

#ifdef POSITION_ONLY
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
void main() {
    gl_Position = vec4(aPosition, 1.0);
}
#endif
#ifdef FRAGMENT
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(1.0);
}
#endif
#endif

#ifdef NEEDS_TANGENT_SIX
#ifdef VERTEX
layout(location = 0) in vec3 aPosition;
layout(location = 6) in vec4 aExtra;
void main() {
    gl_Position = vec4(aPosition, 1.0) + aExtra;
}
#endif
#ifdef FRAGMENT
layout(location = 0) out vec4 oColor;
void main() {
    oColor = vec4(1.0);
}
#endif
#endif
"#;

pub const CUBE_OBJ: &str = "\
mtllib cube.mtl
o Front
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl Painted
f 1/1/1 2/2/1 3/3/1 4/4/1
o Back
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
usemtl Plain
f 5 7 6
";

/// One object, one material-less face: imports as a single submesh
pub const PANEL_OBJ: &str = "\
o Panel
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

pub const CUBE_MTL: &str = "\
newmtl Painted
Kd 0.8 0.2 0.2
Ns 250
Ke 0.1 0.0 0.0
map_Kd painted.png

newmtl Plain
Kd 1 1 1
map_Kd missing.png
";

pub fn renderer() -> Renderer<RecordingDevice> {
    Renderer::new(RecordingDevice::new(), RenderConfig::default())
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Rewrites a file and pushes its modification time clearly past the previous one
pub fn touch_with(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
    let later = SystemTime::now() + Duration::from_secs(10);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(later)
        .unwrap();
}

pub fn write_rgb_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30])).save(&path).unwrap();
    path
}
