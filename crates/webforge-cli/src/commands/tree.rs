use anyhow::Result;
use webforge_core::file_tree::FileTree;

pub fn run(json: bool) -> Result<()> {
    let tree = FileTree::default();
    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render(&tree));
    }
    Ok(())
}

fn render(tree: &FileTree) -> String {
    tree.walk()
        .map(|(depth, node)| format!("{}{}\n", "  ".repeat(depth), node.listing_label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_indents_children() {
        let text = render(&FileTree::default());
        assert!(text.starts_with("📁 src/\n  📄 App.jsx\n"));
        assert!(text.ends_with("📄 package.json\n"));
    }
}
