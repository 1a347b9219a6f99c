//! Content-sniffing classifier.
//!
//! [`classify`] inspects raw asset text and decides how the rest of the pipeline should treat it:
//! whether the theme color may be applied, whether authored styling must be preserved, whether a
//! viewBox must be synthesized and whether vendor attributes may be stripped.

pub(crate) mod analysis;
pub(crate) mod scan;

/// Processing strategy for an asset. Decided in declaration order of precedence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Plain geometry; safe to theme.
    #[default]
    Simple,
    /// Animation primitives, gradients or authored paint styles.
    Complex,
    /// Carries executable script markers.
    Interactive,
    /// Uses geometric `transform` attributes.
    Transformed,
    /// Exported from an authoring tool with vendor namespaces.
    MetadataHeavy,
}

/// viewBox findings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBoxInfo {
    /// Root element declares a non-empty viewBox.
    pub present: bool,
    /// Raw declared value.
    pub value: Option<String>,
    /// Square viewBox at the origin whose side is a standard icon size.
    pub is_standard_size: bool,
}

/// Color authoring findings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    /// At least two distinct color literals.
    pub multi_color: bool,
    /// At least one literal outside the generic palette.
    pub fixed_colors: bool,
    /// Authored colors must survive theming.
    pub should_preserve: bool,
    /// Number of distinct color literals found.
    pub distinct_colors: usize,
}

/// Handling derived from the structural flags and the optional name hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Overwrite generic paint with the caller's theme colors.
    pub apply_theme_color: bool,
    /// Leave authored fills, strokes and styles alone.
    pub preserve_original_styles: bool,
    /// Synthesize a viewBox from content bounds when absent.
    pub force_view_box: bool,
    /// Strip vendor authoring attributes and metadata.
    pub clean_attributes: bool,
}

/// Structural verdict on an asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Chosen strategy.
    pub category: Category,
    /// Script element, inline handler or `javascript:` URL present.
    pub has_script: bool,
    /// SMIL or CSS animation present.
    pub has_animation_primitives: bool,
    /// Gradient paint servers present.
    pub has_gradients: bool,
    /// `transform` attributes present.
    pub has_transforms: bool,
    /// Vendor authoring namespaces present.
    pub has_vendor_metadata: bool,
    /// Inline or sheet styles author paint.
    pub has_authored_styles: bool,
    /// viewBox analysis.
    pub view_box: ViewBoxInfo,
    /// Color analysis.
    pub colors: ColorInfo,
    /// Derived handling.
    pub recommendations: Recommendations,
}

/// Symbol families that keep their authored look regardless of structure.
const PRESERVED_NAME_FAMILIES: &[&str] = &["valve", "pump", "tank"];
const PRESERVED_NAME_PREFIXES: &[&str] = &["shape-", "shape_"];

/// Classify raw asset content.
///
/// Pure and deterministic: the same `content` and `name_hint` always produce equal results.
/// Content that matches no heuristic (including unparsable text) is [`Category::Simple`].
pub fn classify(content: &str, name_hint: Option<&str>) -> Classification {
    let lower = content.to_ascii_lowercase();
    let parsed = analysis::Parsed::new(content);

    let has_script = scan::has_script(&lower);
    let has_vendor_metadata = scan::has_vendor_metadata(&lower);
    let has_transforms = scan::has_transforms(&lower);
    let has_animation_primitives = scan::has_animation_primitives(&lower);
    let has_gradients = scan::has_gradients(&lower);
    let has_authored_styles = parsed.has_authored_styles();

    let category = if has_script {
        Category::Interactive
    } else if has_vendor_metadata {
        Category::MetadataHeavy
    } else if has_transforms {
        Category::Transformed
    } else if has_animation_primitives || has_gradients || has_authored_styles {
        Category::Complex
    } else {
        Category::Simple
    };

    let view_box = parsed.view_box();
    let colors = parsed.colors();
    let recommendations = recommend(category, &view_box, &colors, name_hint);

    Classification {
        category,
        has_script,
        has_animation_primitives,
        has_gradients,
        has_transforms,
        has_vendor_metadata,
        has_authored_styles,
        view_box,
        colors,
        recommendations,
    }
}

/// Recommendation table. The name-hint exception is applied last.
pub fn recommend(
    category: Category,
    view_box: &ViewBoxInfo,
    colors: &ColorInfo,
    name_hint: Option<&str>,
) -> Recommendations {
    let mut rec = match category {
        Category::Interactive => Recommendations {
            apply_theme_color: false,
            preserve_original_styles: true,
            force_view_box: false,
            clean_attributes: false,
        },
        Category::MetadataHeavy => Recommendations {
            apply_theme_color: false,
            preserve_original_styles: true,
            force_view_box: !view_box.present,
            clean_attributes: true,
        },
        Category::Transformed => Recommendations {
            apply_theme_color: false,
            preserve_original_styles: true,
            force_view_box: !view_box.present,
            clean_attributes: false,
        },
        Category::Complex => Recommendations {
            apply_theme_color: !colors.should_preserve,
            preserve_original_styles: colors.should_preserve,
            force_view_box: false,
            clean_attributes: false,
        },
        Category::Simple => Recommendations {
            apply_theme_color: true,
            preserve_original_styles: false,
            force_view_box: !view_box.present,
            clean_attributes: false,
        },
    };

    if name_hint.is_some_and(is_preserved_name) {
        rec.apply_theme_color = false;
        rec.preserve_original_styles = true;
    }
    rec
}

fn is_preserved_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PRESERVED_NAME_FAMILIES.iter().any(|f| name.contains(f))
        || PRESERVED_NAME_PREFIXES.iter().any(|p| name.starts_with(p))
}

#[cfg(test)]
#[path = "../../tests/unit/classify/classify.rs"]
mod tests;
