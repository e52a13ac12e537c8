use cwscript_core::types::{Block, Condition, Document, Node, Property, PropertyValue, Trivia};

/// One indentation level.
const INDENT: &str = "\t";

/// Print a document to script text.
///
/// Nodes read by the formatting-preserving parser are reproduced verbatim;
/// all other nodes are laid out with one tab per nesting level, one node
/// per line.
pub fn print(document: &Document) -> String {
    let mut output = String::new();
    let closing = document
        .trivia
        .preserved
        .then_some(document.trivia.trailing.as_str());
    print_children(&document.children, 0, closing, &mut output);
    output.push_str(&document.trivia.trailing);
    output
}

/// Print a single node at the given nesting level.
pub fn print_node(node: &Node, level: usize) -> String {
    let mut output = String::new();
    print_node_into(node, level, &mut output);
    output
}

/// Prints a child sequence.
///
/// `closing` is the layout that follows the sequence when the container is
/// preserved, or `None` for a generated container. Preserved children inside
/// a preserved container are concatenated as-is; every other child starts on
/// its own line.
fn print_children(children: &[Node], level: usize, closing: Option<&str>, output: &mut String) {
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        if closing.is_some() && child.is_preserved() {
            print_node_into(child, level, output);
            continue;
        }

        start_line(output);
        print_node_into(child, level, output);
        let closing_breaks = i == last && closing.is_some_and(starts_with_line_break);
        if !output.ends_with('\n') && !closing_breaks {
            output.push('\n');
        }
    }
}

fn print_node_into(node: &Node, level: usize, output: &mut String) {
    match node {
        Node::Block(block) => print_block(block, level, false, output),
        Node::Property(property) => print_property(property, level, output),
        Node::Condition(condition) => print_condition(condition, level, false, output),
        Node::Value(value) => print_leaf(&value.scalar.render(), &value.trivia, level, output),
        Node::Comment(comment) => print_leaf(&comment.text, &comment.trivia, level, output),
    }
}

fn print_leaf(text: &str, trivia: &Trivia, level: usize, output: &mut String) {
    output.push_str(&trivia.leading);
    if !trivia.preserved {
        indent(level, output);
    }
    output.push_str(text);
    finish(trivia, level, output);
}

fn print_property(property: &Property, level: usize, output: &mut String) {
    let trivia = &property.trivia;
    output.push_str(&trivia.leading);
    if trivia.preserved {
        output.push_str(&property.key);
        output.push_str(&property.key_space);
        output.push_str(&property.operator);
        output.push_str(&property.operator_space);
    } else {
        indent(level, output);
        output.push_str(&property.key);
        output.push(' ');
        output.push_str(&property.operator);
        output.push(' ');
    }

    match &property.value {
        PropertyValue::Scalar(scalar) => output.push_str(&scalar.render()),
        PropertyValue::Block(block) => print_block(block, level, true, output),
        PropertyValue::Condition(condition) => print_condition(condition, level, true, output),
        PropertyValue::Absent => output.push_str("null"),
    }

    finish(trivia, level, output);
}

/// `inline` is set when the block is a property value and follows `key = `
/// on the same line.
fn print_block(block: &Block, level: usize, inline: bool, output: &mut String) {
    let trivia = &block.trivia;
    output.push_str(&trivia.leading);
    if trivia.preserved {
        if let Some(name) = &block.name {
            output.push_str(name);
        }
        output.push_str(&block.name_space);
    } else {
        if !inline {
            indent(level, output);
        }
        if let Some(name) = &block.name {
            output.push_str(name);
            output.push(' ');
        }
    }
    print_body(
        &block.children,
        &block.open_space,
        &block.close_space,
        &block.inner_comments,
        level,
        trivia.preserved,
        output,
    );
    finish(trivia, level, output);
}

fn print_condition(condition: &Condition, level: usize, inline: bool, output: &mut String) {
    let trivia = &condition.trivia;
    output.push_str(&trivia.leading);
    if trivia.preserved {
        output.push_str(condition.combinator.as_str());
        output.push_str(&condition.keyword_space);
        if let Some(operator) = &condition.operator {
            output.push_str(operator);
            output.push_str(&condition.operator_space);
        }
    } else {
        if !inline {
            indent(level, output);
        }
        output.push_str(condition.combinator.as_str());
        output.push(' ');
        if let Some(operator) = &condition.operator {
            output.push_str(operator);
            output.push(' ');
        }
    }
    print_body(
        &condition.operands,
        &condition.open_space,
        &condition.close_space,
        &condition.inner_comments,
        level,
        trivia.preserved,
        output,
    );
    finish(trivia, level, output);
}

/// `{ children }` for a block or condition at `level`.
///
/// Preserved bodies carry their comments inside `open_space`; generated
/// ones write `inner_comments` ahead of the first child.
fn print_body(
    children: &[Node],
    open_space: &str,
    close_space: &str,
    inner_comments: &[String],
    level: usize,
    preserved: bool,
    output: &mut String,
) {
    output.push('{');
    if preserved {
        output.push_str(open_space);
        print_children(children, level + 1, Some(close_space), output);
        output.push_str(close_space);
    } else if !children.is_empty() || !inner_comments.is_empty() {
        for comment in inner_comments {
            start_line(output);
            indent(level + 1, output);
            output.push_str(comment);
        }
        print_children(children, level + 1, None, output);
        start_line(output);
        indent(level, output);
    }
    output.push('}');
}

/// Emits trailing layout. Generated nodes re-emit attached comments on
/// their own lines first, since their original layout is gone.
fn finish(trivia: &Trivia, level: usize, output: &mut String) {
    if !trivia.preserved {
        for comment in &trivia.comments {
            output.push('\n');
            indent(level, output);
            output.push_str(comment);
        }
    }
    output.push_str(&trivia.trailing);
}

fn indent(level: usize, output: &mut String) {
    for _ in 0..level {
        output.push_str(INDENT);
    }
}

/// Moves the output to the start of a fresh line, discarding indentation
/// left on an otherwise blank last line.
fn start_line(output: &mut String) {
    let line_start = output.rfind('\n').map_or(0, |i| i + 1);
    if output[line_start..].chars().all(|c| c == ' ' || c == '\t') {
        output.truncate(line_start);
    } else {
        output.push('\n');
    }
}

fn starts_with_line_break(text: &str) -> bool {
    text.starts_with('\n') || text.starts_with("\r\n")
}
