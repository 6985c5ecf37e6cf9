#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerOption {
    pub id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub const LAYER_OPTIONS: [LayerOption; 5] = [
    LayerOption { id: "movilidad", label: "Movilidad", color: "#2563eb" },
    LayerOption { id: "salud", label: "Salud", color: "#16a34a" },
    LayerOption { id: "seguridad", label: "Seguridad", color: "#f97316" },
    LayerOption { id: "educacion", label: "Educación", color: "#9333ea" },
    LayerOption { id: "legislativo", label: "Legislativo", color: "#0ea5e9" },
];

pub const DEFAULT_MARKER_COLOR: &str = "#2563eb";

pub fn known_layer_ids() -> Vec<String> {
    LAYER_OPTIONS.iter().map(|option| option.id.to_string()).collect()
}

pub fn layer_option(id: &str) -> Option<&'static LayerOption> {
    LAYER_OPTIONS.iter().find(|option| option.id == id)
}

pub fn category_color(category: &str) -> &'static str {
    layer_option(category)
        .map(|option| option.color)
        .unwrap_or(DEFAULT_MARKER_COLOR)
}

pub fn category_label(category: &str) -> String {
    layer_option(category)
        .map(|option| option.label.to_string())
        .unwrap_or_else(|| category.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_have_their_own_color() {
        assert_eq!(category_color("salud"), "#16a34a");
        assert_eq!(category_color("legislativo"), "#0ea5e9");
    }

    #[test]
    fn unknown_category_falls_back_to_default_color() {
        assert_eq!(category_color("cultura"), DEFAULT_MARKER_COLOR);
        assert_eq!(category_color(""), DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn unknown_category_label_is_the_raw_tag() {
        assert_eq!(category_label("educacion"), "Educación");
        assert_eq!(category_label("cultura"), "cultura");
    }

    #[test]
    fn known_layer_ids_follow_menu_order() {
        assert_eq!(
            known_layer_ids(),
            vec!["movilidad", "salud", "seguridad", "educacion", "legislativo"]
        );
    }
}
