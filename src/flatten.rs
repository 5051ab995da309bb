//! Flattening of four-level menu trees into composite-key maps

use crate::types::*;

/// Flatten a tree into `FlatKey -> quantity`, keeping positive quantities only
pub fn flatten_tree(tree: &MenuTree) -> FlatMenu {
    let mut flat = FlatMenu::default();

    for (cat_name, category) in &tree.categories {
        for (cuisine_name, cuisine) in &category.cuisines {
            for (subcat_name, subcategory) in &cuisine.subcategories {
                for (item_name, &qty) in &subcategory.items {
                    if qty <= 0 {
                        continue;
                    }
                    let qty = qty as u64;
                    let key = FlatKey::new(
                        cat_name.as_str(),
                        cuisine_name.as_str(),
                        subcat_name.as_str(),
                        item_name.as_str(),
                    );
                    flat.quantities.insert(key, qty);
                    flat.total = flat.total.saturating_add(qty);
                }
            }
        }
    }

    flat
}

pub fn flatten_requirements(req: &RequirementTree) -> FlatMenu {
    flatten_tree(req)
}

pub fn flatten_package(package: &PackageOffering) -> FlatMenu {
    flatten_tree(&package.menu)
}
