use crate::app::node::{NodeId, TestTree};
use crate::app::result::FailureRecord;
use crate::reporter::escape::escape_xml;
use crate::reporter::{status, Indent};
use std::io::{self, Write};

static TEST_TAG: &str = "Test";
static NAME_TAG: &str = "Name";
static RESULT_TAG: &str = "Result";
static FAILURE_DETAILS_TAG: &str = "FailureDetails";
static CONDITION_TAG: &str = "Condition";
static ACTUAL_TAG: &str = "Actual";
static LIMIT_TAG: &str = "Limit";
static MESSAGE_TAG: &str = "Message";
static FILE_TAG: &str = "File";
static LINE_TAG: &str = "Line";

/// Always recurses into children, whatever the verbosity.
pub(super) fn write_node(tree: &TestTree, id: NodeId, out: &mut dyn Write, level: usize) -> io::Result<()> {
    let result = match tree.result(id) {
        Some(result) => result,
        None => return Ok(()),
    };
    writeln!(out, "{}<{}>", Indent(level), TEST_TAG)?;
    write_element(out, level + 1, NAME_TAG, &escape_xml(tree.name(id)))?;
    write_element(out, level + 1, RESULT_TAG, status(tree, id))?;
    writeln!(
        out,
        "{}<Time real=\"{:.3}\" user=\"{:.3}\" system=\"{:.3}\"/>",
        Indent(level + 1),
        result.elapsed.real_secs(),
        result.elapsed.user_secs(),
        result.elapsed.system_secs()
    )?;
    for failure in &result.failures {
        write_failure(out, level + 2, failure)?;
    }
    for child in tree.children(id) {
        write_node(tree, *child, out, level + 1)?;
    }
    writeln!(out, "{}</{}>", Indent(level), TEST_TAG)
}

fn write_failure(out: &mut dyn Write, level: usize, failure: &FailureRecord) -> io::Result<()> {
    // Destructure so a new field cannot be silently left out.
    let FailureRecord {
        condition,
        actual,
        limit,
        message,
        file,
        line,
    } = failure;

    writeln!(out, "{}<{}>", Indent(level), FAILURE_DETAILS_TAG)?;
    write_element(out, level + 1, CONDITION_TAG, &escape_xml(condition))?;
    write_element(out, level + 1, ACTUAL_TAG, &escape_xml(actual))?;
    write_element(out, level + 1, LIMIT_TAG, &escape_xml(limit))?;
    write_element(out, level + 1, MESSAGE_TAG, &escape_xml(message))?;
    write_element(out, level + 1, FILE_TAG, &escape_xml(file))?;
    write_element(out, level + 1, LINE_TAG, &line.to_string())?;
    writeln!(out, "{}</{}>", Indent(level), FAILURE_DETAILS_TAG)
}

fn write_element(out: &mut dyn Write, level: usize, tag: &str, text: &str) -> io::Result<()> {
    writeln!(out, "{}<{}>{}</{}>", Indent(level), tag, text, tag)
}

#[cfg(test)]
mod test {
    use crate::app::environment::SimulationEnvironment;
    use crate::app::executor::run_node;
    use crate::app::hooks::{case, NoOp};
    use crate::app::node::TestTree;
    use crate::app::options::RunOptions;
    use crate::app::result::FailureRecord;
    use crate::app::suite::DurationClass;
    use crate::reporter::{Format, Reporter};
    use regex::Regex;

    fn render(tree: &TestTree) -> String {
        let mut out = Vec::new();
        Reporter::new(Format::Xml, false).report(tree, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn times_to_zero(report: &str) -> String {
        Regex::new(r#""\d+\.\d{3}""#)
            .unwrap()
            .replace_all(report, "\"0.000\"")
            .into_owned()
    }

    #[test]
    fn test_nested_report_with_failure_details() {
        let mut tree = TestTree::new("S <1>", Box::new(NoOp));
        let root = tree.root();
        tree.add_case(
            root,
            "C",
            DurationClass::Quick,
            case(|ctx| {
                ctx.report_failure(FailureRecord::new("a < b", "\"x\"", "'y'", "m & n", "f.rs", 7))
            }),
        );
        tree.add_case(root, "never", DurationClass::Quick, NoOp);
        run_node(&mut tree, root, &RunOptions::default(), &mut SimulationEnvironment::new());

        let expected = concat!(
            "<Test>\n",
            "  <Name>S &lt;1&gt;</Name>\n",
            "  <Result>FAIL</Result>\n",
            "  <Time real=\"0.000\" user=\"0.000\" system=\"0.000\"/>\n",
            "  <Test>\n",
            "    <Name>C</Name>\n",
            "    <Result>FAIL</Result>\n",
            "    <Time real=\"0.000\" user=\"0.000\" system=\"0.000\"/>\n",
            "      <FailureDetails>\n",
            "        <Condition>a &lt; b</Condition>\n",
            "        <Actual>&#39;x&#39;</Actual>\n",
            "        <Limit>&quot;y&quot;</Limit>\n",
            "        <Message>m &amp; n</Message>\n",
            "        <File>f.rs</File>\n",
            "        <Line>7</Line>\n",
            "      </FailureDetails>\n",
            "  </Test>\n",
            "</Test>\n",
        );
        assert_eq!(times_to_zero(&render(&tree)), expected);
    }

    #[test]
    fn test_passing_leaf() {
        let mut tree = TestTree::new("leaf", Box::new(NoOp));
        let root = tree.root();
        run_node(&mut tree, root, &RunOptions::default(), &mut SimulationEnvironment::new());

        let report = times_to_zero(&render(&tree));

        assert!(report.contains("  <Result>PASS</Result>\n"));
        assert!(!report.contains("FailureDetails"));
    }
}
