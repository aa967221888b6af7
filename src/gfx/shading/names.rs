//! Shading parameter names shared by the uploader and the GPU backend

pub const PROJECTION: &str = "mProjection";
pub const VIEW: &str = "mView";
pub const MODEL: &str = "mModel";
pub const MODEL_VIEW: &str = "mModelView";
pub const NORMALS: &str = "mNormals";
pub const MODEL_NORMALS: &str = "mModelNormals";
pub const MODEL_VIEW_NORMALS: &str = "mModelViewNormals";

pub const MATERIAL_KA: &str = "uMaterial.Ka";
pub const MATERIAL_KD: &str = "uMaterial.Kd";
pub const MATERIAL_KS: &str = "uMaterial.Ks";
pub const MATERIAL_SHININESS: &str = "uMaterial.shininess";

pub const LIGHT_COUNT: &str = "uNLights";

pub const COLOR: &str = "fColor";
pub const HAS_COLOR: &str = "hasColor";

/// Field of a `uLight[i]` array element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Position,
    Ambient,
    Diffuse,
    Specular,
    IsDirectional,
    IsActive,
}

impl LightField {
    pub const ALL: [LightField; 6] = [
        LightField::Position,
        LightField::Ambient,
        LightField::Diffuse,
        LightField::Specular,
        LightField::IsDirectional,
        LightField::IsActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LightField::Position => "pos",
            LightField::Ambient => "Ia",
            LightField::Diffuse => "Id",
            LightField::Specular => "Is",
            LightField::IsDirectional => "isDirectional",
            LightField::IsActive => "isActive",
        }
    }

    fn parse(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == field)
    }
}

/// Builds `uLight[index].field`
pub fn light(index: usize, field: LightField) -> String {
    format!("uLight[{}].{}", index, field.as_str())
}

/// Parses `uLight[index].field`, returning `None` for any other name
pub fn parse_light(name: &str) -> Option<(usize, LightField)> {
    let rest = name.strip_prefix("uLight[")?;
    let (index, field) = rest.split_once("].")?;
    let index = index.parse().ok()?;
    Some((index, LightField::parse(field)?))
}
