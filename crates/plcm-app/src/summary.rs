use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use plcm_app::state::RecentProject;
use plcm_model::{Device, Document, VariableGroup, VariableNode};

pub fn print_project_summary(title: &str, document: &Document) {
    println!("{title}");
    if let Some(path) = document.file_path() {
        println!("File: {}", path.display());
    }
    println!("{}", project_table(document));
}

pub fn print_recent_projects(projects: &[&RecentProject]) {
    if projects.is_empty() {
        println!("No recent projects.");
        return;
    }
    println!("{}", recent_table(projects));
}

fn project_table(document: &Document) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("PLC"),
        header_cell("Address"),
        header_cell("Groups"),
        header_cell("Variables"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_groups = 0usize;
    let mut total_variables = 0usize;
    for device in document.devices() {
        let groups = group_count(device.root());
        let variables = device.variable_count();
        total_groups += groups;
        total_variables += variables;
        table.add_row(vec![
            device_cell(device),
            Cell::new(&device.address),
            count_cell(groups),
            count_cell(variables),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} PLCs", document.devices().len())),
        Cell::new(total_groups).add_attribute(Attribute::Bold),
        Cell::new(total_variables).add_attribute(Attribute::Bold),
    ]);
    table
}

fn recent_table(projects: &[&RecentProject]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Project"),
        header_cell("Last opened"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    for project in projects {
        let path_cell = if project.exists() {
            Cell::new(project.path.display())
        } else {
            dim_cell(format!("{} (missing)", project.path.display()))
        };
        table.add_row(vec![
            Cell::new(&project.display_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(project.relative_time()),
            path_cell,
        ]);
    }
    table
}

/// Nested groups below the device root.
fn group_count(group: &VariableGroup) -> usize {
    group
        .children()
        .iter()
        .map(|node| match node {
            VariableNode::Group(inner) => 1 + group_count(inner),
            VariableNode::Variable(_) => 0,
        })
        .sum()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn device_cell(device: &Device) -> Cell {
    Cell::new(&device.name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcm_model::{DataType, Variable};

    #[test]
    fn test_group_count_is_recursive() {
        let root = VariableGroup::new("Variables")
            .with_child(Variable::new("Running", "DB1.DBX0.0", DataType::Bool))
            .with_child(
                VariableGroup::new("Drive").with_child(VariableGroup::new("Limits")),
            );
        assert_eq!(group_count(&root), 2);
    }

    #[test]
    fn test_project_table_lists_devices() {
        let mut document = Document::new();
        document.add_device(Device::new("Press", "10.0.0.5"));
        document.add_device(Device::new("Mixer", "10.0.0.6"));

        let rendered = project_table(&document).to_string();
        assert!(rendered.contains("Press"));
        assert!(rendered.contains("10.0.0.6"));
        assert!(rendered.contains("2 PLCs"));
    }
}
