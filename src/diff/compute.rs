//! Line-level unified-diff computation for sources that ship whole files
//! (vulnerable and patched variants) instead of pre-rendered diffs.
//!
//! Classic LCS over lines with common prefix/suffix trimming to keep the
//! table small; output follows the conventional unified format so it feeds
//! straight into the same hunk-extraction path as downloaded diffs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: Tag,
    a1: usize,
    a2: usize,
    b1: usize,
    b2: usize,
}

/// Compute a unified diff between two line sequences.
///
/// `context` is the number of unchanged lines kept around each change
/// block. Identical inputs produce no output at all (no headers), which
/// the parser turns into an empty patch.
#[must_use]
pub fn unified_diff(
    from: &[String],
    to: &[String],
    fromfile: &str,
    tofile: &str,
    context: usize,
) -> Vec<String> {
    let codes = opcodes(from, to);
    let groups = grouped(&codes, context);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    out.push(format!("--- {fromfile}"));
    out.push(format!("+++ {tofile}"));

    for group in &groups {
        let first = group[0];
        let last = group[group.len() - 1];
        out.push(format!(
            "@@ -{} +{} @@",
            format_range(first.a1, last.a2),
            format_range(first.b1, last.b2)
        ));
        for op in group {
            match op.tag {
                Tag::Equal => {
                    for line in &from[op.a1..op.a2] {
                        out.push(format!(" {line}"));
                    }
                }
                Tag::Delete => {
                    for line in &from[op.a1..op.a2] {
                        out.push(format!("-{line}"));
                    }
                }
                Tag::Insert => {
                    for line in &to[op.b1..op.b2] {
                        out.push(format!("+{line}"));
                    }
                }
            }
        }
    }
    out
}

/// Conventional unified range: `start,length` (1-based), with the length
/// omitted when it is exactly one and the start anchored on the preceding
/// line for empty ranges.
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        1 => format!("{}", start + 1),
        0 => format!("{start},0"),
        _ => format!("{},{length}", start + 1),
    }
}

/// Merged edit opcodes covering both sequences end to end.
fn opcodes(a: &[String], b: &[String]) -> Vec<Opcode> {
    let (la, lb) = (a.len(), b.len());

    // Common prefix/suffix carry no information for the LCS table.
    let mut prefix = 0;
    while prefix < la && prefix < lb && a[prefix] == b[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < la - prefix && suffix < lb - prefix && a[la - 1 - suffix] == b[lb - 1 - suffix] {
        suffix += 1;
    }

    let mid_a = &a[prefix..la - suffix];
    let mid_b = &b[prefix..lb - suffix];

    fn push(codes: &mut Vec<Opcode>, tag: Tag, a1: usize, a2: usize, b1: usize, b2: usize) {
        if a1 == a2 && b1 == b2 {
            return;
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == tag && last.a2 == a1 && last.b2 == b1 {
                last.a2 = a2;
                last.b2 = b2;
                return;
            }
        }
        codes.push(Opcode { tag, a1, a2, b1, b2 });
    }

    let mut codes: Vec<Opcode> = Vec::new();

    push(&mut codes, Tag::Equal, 0, prefix, 0, prefix);
    for step in backtrack(mid_a, mid_b) {
        let (tag, a1, a2, b1, b2) = step;
        push(
            &mut codes,
            tag,
            a1 + prefix,
            a2 + prefix,
            b1 + prefix,
            b2 + prefix,
        );
    }
    push(&mut codes, Tag::Equal, la - suffix, la, lb - suffix, lb);
    codes
}

/// LCS table + backtrack over the trimmed middle, yielding unit steps in
/// forward order.
fn backtrack(a: &[String], b: &[String]) -> Vec<(Tag, usize, usize, usize, usize)> {
    let (m, n) = (a.len(), b.len());
    let width = n + 1;
    let mut table = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if a[i - 1] == b[j - 1] {
                table[(i - 1) * width + j - 1] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + j - 1])
            };
        }
    }

    let mut steps = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            steps.push((Tag::Equal, i - 1, i, j - 1, j));
            i -= 1;
            j -= 1;
        } else if table[i * width + j - 1] >= table[(i - 1) * width + j] {
            // Preferring the insert branch here puts deletions first once
            // the steps are reversed into forward order.
            steps.push((Tag::Insert, i, i, j - 1, j));
            j -= 1;
        } else {
            steps.push((Tag::Delete, i - 1, i, j, j));
            i -= 1;
        }
    }
    while i > 0 {
        steps.push((Tag::Delete, i - 1, i, j, j));
        i -= 1;
    }
    while j > 0 {
        steps.push((Tag::Insert, i, i, j - 1, j));
        j -= 1;
    }
    steps.reverse();
    steps
}

/// Group opcodes into hunks separated by more than `2 * context` unchanged
/// lines, trimming leading/trailing context to `context` lines.
fn grouped(codes: &[Opcode], context: usize) -> Vec<Vec<Opcode>> {
    if codes.is_empty() {
        return Vec::new();
    }
    let mut codes = codes.to_vec();

    if codes[0].tag == Tag::Equal {
        let c = codes[0];
        codes[0] = Opcode {
            a1: c.a1.max(c.a2.saturating_sub(context)),
            b1: c.b1.max(c.b2.saturating_sub(context)),
            ..c
        };
    }
    let last = codes.len() - 1;
    if codes[last].tag == Tag::Equal {
        let c = codes[last];
        codes[last] = Opcode {
            a2: c.a2.min(c.a1 + context),
            b2: c.b2.min(c.b1 + context),
            ..c
        };
    }

    let mut groups = Vec::new();
    let mut group: Vec<Opcode> = Vec::new();
    for c in codes {
        if c.tag == Tag::Equal && c.a2 - c.a1 > 2 * context {
            group.push(Opcode {
                a2: c.a2.min(c.a1 + context),
                b2: c.b2.min(c.b1 + context),
                ..c
            });
            groups.push(std::mem::take(&mut group));
            group.push(Opcode {
                a1: c.a1.max(c.a2.saturating_sub(context)),
                b1: c.b1.max(c.b2.saturating_sub(context)),
                ..c
            });
            continue;
        }
        group.push(c);
    }
    if !group.is_empty() && !(group.len() == 1 && group[0].tag == Tag::Equal) {
        groups.push(group);
    }
    groups
}
