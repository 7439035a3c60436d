use mxsan::{sanitize, sanitize_with_summary};

#[test]
fn lt_in_attribute_value() {
    assert_eq!(
        r#"<mxCell value="x &lt; y" />"#,
        sanitize(r#"<mxCell value="x < y" />"#)
    );
}

#[test]
fn lt_before_symbol_is_escaped() {
    assert_eq!("<t>price &lt;€5</t>", sanitize("<t>price <€5</t>"));
    assert_eq!("<t>a &lt;™ b</t>", sanitize("<t>a <™ b</t>"));
    assert_eq!("<t>x &lt;、y</t>", sanitize("<t>x <、y</t>"));
    assert_eq!("<t>a &lt;→ b</t>", sanitize("<t>a <→ b</t>"));
}

#[test]
fn bare_ampersand_in_text() {
    assert_eq!("<text>A &amp; B</text>", sanitize("<text>A & B</text>"));
}

#[test]
fn embedded_double_quotes() {
    assert_eq!(
        r#"<mxCell value="He said &quot;hi&quot;" />"#,
        sanitize(r#"<mxCell value="He said "hi"" />"#)
    );
}

#[test]
fn already_escaped_text() {
    let input = "<text>already &lt; escaped</text>";
    assert_eq!(input, sanitize(input));
}

#[test]
fn embedded_apostrophe() {
    assert_eq!(
        "<mxCell value='Bob&apos;s diagram' />",
        sanitize("<mxCell value='Bob's diagram' />")
    );
}

#[test]
fn comparisons_in_text() {
    assert_eq!(
        r#"<div style="font-size:12px">if x &lt; 10 then y &gt; 20</div>"#,
        sanitize(r#"<div style="font-size:12px">if x < 10 then y > 20</div>"#)
    );
}

#[test]
fn numeric_references_are_not_double_escaped() {
    let input = r#"<a v="&#60;&#x3c;&#x3C;">&#8594; &#x2192; &rarr;</a>"#;
    assert_eq!(input, sanitize(input));
}

#[test]
fn malformed_references_are_escaped() {
    assert_eq!(
        "<a>&amp;#; &amp;x; &amp;#xG; &amp;</a>",
        sanitize("<a>&#; &x; &#xG; &</a>")
    );
}

#[test]
fn ampersand_scan_stops_at_first_semicolon() {
    // "&copy" has no semicolon of its own, the next one belongs to "&lt;"
    assert_eq!("<a>&amp;copy 2024 &lt;</a>", sanitize("<a>&copy 2024 &lt;</a>"));
}

#[test]
fn comment_is_verbatim() {
    let input = "<root><!-- if a < b && c > d then \"x\" --><a/></root>";
    assert_eq!(input, sanitize(input));
}

#[test]
fn cdata_is_verbatim() {
    let input = "<script><![CDATA[if (a < b && c > d) { x = '\"'; }]]></script>";
    assert_eq!(input, sanitize(input));
}

#[test]
fn text_after_cdata_is_escaped_again() {
    assert_eq!(
        "<a><![CDATA[<>&]]>&lt; &gt; &amp;</a>",
        sanitize("<a><![CDATA[<>&]]>< > &</a>")
    );
}

#[test]
fn doctype_and_processing_instruction() {
    let input = "<?xml version=\"1.0\"?>\n<!DOCTYPE mxfile>\n<mxfile host=\"app.diagrams.net\"></mxfile>";
    assert_eq!(input, sanitize(input));
}

#[test]
fn generated_diagram() {
    let input = r#"<mxGraphModel dx="1434" dy="780">
  <root>
    <mxCell id="0" />
    <mxCell id="1" parent="0" />
    <mxCell id="2" value="Request <HTTP>" style="rounded=1;whiteSpace=wrap;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="3" value="Check "auth", then retry & log" style="shape=rhombus;" vertex="1" parent="1">
      <mxGeometry x="220" y="40" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="4" value="x &gt; 0 &amp;&amp; y < 1" edge="1" source="2" target="3" parent="1" />
  </root>
</mxGraphModel>"#;
    let expected = r#"<mxGraphModel dx="1434" dy="780">
  <root>
    <mxCell id="0" />
    <mxCell id="1" parent="0" />
    <mxCell id="2" value="Request &lt;HTTP&gt;" style="rounded=1;whiteSpace=wrap;html=1;" vertex="1" parent="1">
      <mxGeometry x="40" y="40" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="3" value="Check &quot;auth&quot;, then retry &amp; log" style="shape=rhombus;" vertex="1" parent="1">
      <mxGeometry x="220" y="40" width="120" height="60" as="geometry" />
    </mxCell>
    <mxCell id="4" value="x &gt; 0 &amp;&amp; y &lt; 1" edge="1" source="2" target="3" parent="1" />
  </root>
</mxGraphModel>"#;

    let (output, summary) = sanitize_with_summary(input);
    assert_eq!(expected, output);
    assert!(summary.is_complete());
    assert_eq!(2, summary.escapes.lt);
    assert_eq!(1, summary.escapes.gt);
    assert_eq!(1, summary.escapes.amp);
    assert_eq!(2, summary.escapes.quot);
}

#[test]
fn html_label_with_escaped_markup() {
    let input = r#"<mxCell value="&lt;b&gt;Bold&lt;/b&gt;&lt;br&gt;line" style="html=1;" />"#;
    assert_eq!(input, sanitize(input));
}

#[test]
fn quote_followed_by_whitespace_closes_value() {
    // the quote after "hi" is taken as the closing one, the rest of the tag becomes a new value
    let (output, summary) = sanitize_with_summary(r#"<a v="say "hi" there" />"#);
    assert_eq!(r#"<a v="say &quot;hi" there" /&gt;"#, output);
    assert!(!summary.is_complete());
}

#[test]
fn sanitizing_twice_changes_nothing() {
    let input = r#"<mxCell value="He said "hi"!" /><t>1 < 2 & 3</t>"#;
    let once = sanitize(input);
    assert_eq!(
        r#"<mxCell value="He said &quot;hi&quot;!" /><t>1 &lt; 2 &amp; 3</t>"#,
        once
    );
    assert_eq!(once, sanitize(&once));
}
