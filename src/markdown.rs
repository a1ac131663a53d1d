use super::*;

pub(crate) fn to_plain_text(markdown: &str) -> String {
  let mut text = String::new();
  let mut list_depth = 0usize;

  for event in MarkdownParser::new(markdown) {
    match event {
      MarkdownEvent::Text(fragment) | MarkdownEvent::Code(fragment) => {
        text.push_str(&fragment);
      }
      MarkdownEvent::SoftBreak => text.push(' '),
      MarkdownEvent::HardBreak => text.push('\n'),
      MarkdownEvent::Start(Tag::List(_)) => {
        list_depth = list_depth.saturating_add(1);
      }
      MarkdownEvent::End(TagEnd::List(_)) => {
        list_depth = list_depth.saturating_sub(1);

        if list_depth == 0 {
          end_block(&mut text);
        }
      }
      MarkdownEvent::Start(Tag::Item) => {
        end_line(&mut text);
        text.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
        text.push_str("- ");
      }
      MarkdownEvent::End(TagEnd::Item) => end_line(&mut text),
      MarkdownEvent::End(TagEnd::Paragraph) if list_depth > 0 => {
        end_line(&mut text);
      }
      MarkdownEvent::End(
        TagEnd::BlockQuote(_)
        | TagEnd::CodeBlock
        | TagEnd::Heading(_)
        | TagEnd::Paragraph,
      ) => end_block(&mut text),
      _ => {}
    }
  }

  text.trim_end().to_string()
}

fn end_block(text: &mut String) {
  end_line(text);

  if !text.is_empty() && !text.ends_with("\n\n") {
    text.push('\n');
  }
}

fn end_line(text: &mut String) {
  if !text.is_empty() && !text.ends_with('\n') {
    text.push('\n');
  }
}
