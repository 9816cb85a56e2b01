use std::{
    collections::{HashMap, VecDeque},
    fmt::Write,
};

use crate::binder::{
    bound_tree::{BoundExpression, BoundLabel, BoundStatement},
    operators::bind_unary_operator,
};
use crate::{lexer::tokens::TokenKind, symbols::types::TypeSymbol, symbols::value::Value};

/// Index of a block inside its graph.
pub type BlockId = usize;

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub id: BlockId,
    pub is_start: bool,
    pub is_end: bool,
    pub statements: Vec<BoundStatement>,
}

/// An edge between two blocks, taken when `condition` holds (always when `None`).
#[derive(Debug, Clone)]
pub struct BasicBlockBranch {
    pub from: BlockId,
    pub to: BlockId,
    pub condition: Option<BoundExpression>,
}

#[derive(Debug)]
pub struct ControlFlowGraph {
    pub start: BlockId,
    pub end: BlockId,
    pub blocks: Vec<BasicBlock>,
    pub branches: Vec<BasicBlockBranch>,
}

/// Splits a lowered body into basic blocks: a new block starts at every label and
/// after every jump or return.
fn split_blocks(statements: &[BoundStatement]) -> Vec<Vec<BoundStatement>> {
    let mut blocks = Vec::new();
    let mut current: Vec<BoundStatement> = Vec::new();

    for statement in statements {
        match statement {
            BoundStatement::Label(_) => {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                current.push(statement.clone());
            }
            BoundStatement::Goto(_)
            | BoundStatement::ConditionalGoto { .. }
            | BoundStatement::Return(_) => {
                current.push(statement.clone());
                blocks.push(std::mem::take(&mut current));
            }
            _ => current.push(statement.clone()),
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn negate(condition: &BoundExpression) -> BoundExpression {
    if let BoundExpression::Literal(Value::Bool(value)) = condition {
        return BoundExpression::Literal(Value::Bool(!value));
    }

    match bind_unary_operator(TokenKind::Not, TypeSymbol::Bool) {
        Some(op) => BoundExpression::Unary {
            op,
            operand: Box::new(condition.clone()),
        },
        None => BoundExpression::Error,
    }
}

impl ControlFlowGraph {
    /// Builds the graph for a lowered statement list. Blocks that cannot be reached
    /// from the start are dropped along with their edges.
    pub fn create(statements: &[BoundStatement]) -> ControlFlowGraph {
        let bodies = split_blocks(statements);

        // Block 0 is the start, block 1 the end, the body blocks follow in order
        let start = 0;
        let end = 1;
        let mut blocks = vec![
            BasicBlock {
                id: start,
                is_start: true,
                is_end: false,
                statements: vec![],
            },
            BasicBlock {
                id: end,
                is_start: false,
                is_end: true,
                statements: vec![],
            },
        ];

        let mut label_lookup: HashMap<BoundLabel, BlockId> = HashMap::new();
        for statements in bodies {
            let id = blocks.len();
            if let Some(BoundStatement::Label(label)) = statements.first() {
                label_lookup.insert(label.clone(), id);
            }
            blocks.push(BasicBlock {
                id,
                is_start: false,
                is_end: false,
                statements,
            });
        }

        let first_body = 2;
        let mut branches = Vec::new();
        let next_of = |id: BlockId| if id + 1 < blocks.len() { id + 1 } else { end };

        branches.push(BasicBlockBranch {
            from: start,
            to: if blocks.len() > first_body { first_body } else { end },
            condition: None,
        });

        for block in &blocks[first_body..] {
            let next = next_of(block.id);
            match block.statements.last() {
                Some(BoundStatement::Goto(label)) => {
                    let to = label_lookup.get(label).copied().unwrap_or(end);
                    branches.push(BasicBlockBranch {
                        from: block.id,
                        to,
                        condition: None,
                    });
                }
                Some(BoundStatement::ConditionalGoto {
                    label,
                    condition,
                    jump_if_true,
                }) => {
                    let then_block = label_lookup.get(label).copied().unwrap_or(end);
                    let negated = negate(condition);
                    let (then_condition, else_condition) = if *jump_if_true {
                        (condition.clone(), negated)
                    } else {
                        (negated, condition.clone())
                    };
                    branches.push(BasicBlockBranch {
                        from: block.id,
                        to: then_block,
                        condition: Some(then_condition),
                    });
                    branches.push(BasicBlockBranch {
                        from: block.id,
                        to: next,
                        condition: Some(else_condition),
                    });
                }
                Some(BoundStatement::Return(_)) => branches.push(BasicBlockBranch {
                    from: block.id,
                    to: end,
                    condition: None,
                }),
                _ => branches.push(BasicBlockBranch {
                    from: block.id,
                    to: next,
                    condition: None,
                }),
            }
        }

        let mut graph = ControlFlowGraph {
            start,
            end,
            blocks,
            branches,
        };
        graph.remove_unreachable();
        graph
    }

    fn remove_unreachable(&mut self) {
        let mut reachable = vec![false; self.blocks.len()];
        let mut queue = VecDeque::from([self.start]);
        reachable[self.start] = true;

        while let Some(id) = queue.pop_front() {
            for branch in self.branches.iter().filter(|branch| branch.from == id) {
                if !reachable[branch.to] {
                    reachable[branch.to] = true;
                    queue.push_back(branch.to);
                }
            }
        }

        self.branches.retain(|branch| reachable[branch.from]);
        self.blocks
            .retain(|block| reachable[block.id] || block.is_end);
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn incoming(&self, id: BlockId) -> impl Iterator<Item = &BasicBlockBranch> {
        self.branches.iter().filter(move |branch| branch.to == id)
    }

    pub fn outgoing(&self, id: BlockId) -> impl Iterator<Item = &BasicBlockBranch> {
        self.branches.iter().filter(move |branch| branch.from == id)
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn write_dot(&self, out: &mut impl Write) -> std::fmt::Result {
        fn quote(text: &str) -> String {
            format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\l"))
        }

        writeln!(out, "digraph G {{")?;

        for block in &self.blocks {
            let label = if block.is_start {
                String::from("<Start>")
            } else if block.is_end {
                String::from("<End>")
            } else {
                block
                    .statements
                    .iter()
                    .map(|statement| format!("{}\n", statement.to_string().trim_end()))
                    .collect()
            };
            writeln!(out, "    N{} [label = {}, shape = box]", block.id, quote(&label))?;
        }

        for branch in &self.branches {
            let label = branch
                .condition
                .as_ref()
                .map(|condition| condition.to_string())
                .unwrap_or_default();
            writeln!(out, "    N{} -> N{} [label = {}]", branch.from, branch.to, quote(&label))?;
        }

        writeln!(out, "}}")
    }
}

/// Whether every path through a lowered body ends in a `return`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn all_paths_return(statements: &[BoundStatement]) -> bool {
    let graph = ControlFlowGraph::create(statements);

    let returns = graph.incoming(graph.end).all(|branch| {
        graph
            .block(branch.from)
            .and_then(|block| block.statements.last())
            .is_some_and(|statement| matches!(statement, BoundStatement::Return(_)))
    });
    returns
}
