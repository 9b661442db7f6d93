/// Builder for Terraform content declaring security postures
///
/// # Example
///
/// ```rust
/// use posture_test_utils::PostureFileBuilder;
///
/// let content = PostureFileBuilder::new()
///     .posture("main", "my-posture")
///     .policy_set("set-1")
///         .policy("Policy_1")
///     .build();
///
/// assert!(content.contains(r#"posture_id  = "my-posture""#));
/// ```
#[derive(Clone, Default)]
pub struct PostureFileBuilder {
    blocks: Vec<PostureBlock>,
    trailing: Vec<String>,
}

#[derive(Clone)]
struct PostureBlock {
    label: String,
    posture_id: Option<String>,
    policy_sets: Vec<PolicySet>,
}

#[derive(Clone)]
struct PolicySet {
    id: String,
    policies: Vec<String>,
}

impl PostureFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a posture resource with a posture_id assignment
    pub fn posture(mut self, label: &str, posture_id: &str) -> Self {
        self.blocks.push(PostureBlock {
            label: label.to_string(),
            posture_id: Some(posture_id.to_string()),
            policy_sets: Vec::new(),
        });
        self
    }

    /// Start a posture resource without any posture_id assignment
    pub fn posture_without_id(mut self, label: &str) -> Self {
        self.blocks.push(PostureBlock {
            label: label.to_string(),
            posture_id: None,
            policy_sets: Vec::new(),
        });
        self
    }

    /// Add a policy set to the current posture
    pub fn policy_set(mut self, id: &str) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.policy_sets.push(PolicySet {
                id: id.to_string(),
                policies: Vec::new(),
            });
        }
        self
    }

    /// Add a policy to the current policy set
    pub fn policy(mut self, id: &str) -> Self {
        if let Some(set) = self.blocks.last_mut().and_then(|b| b.policy_sets.last_mut()) {
            set.policies.push(id.to_string());
        }
        self
    }

    /// Append raw content after the generated resources
    pub fn raw(mut self, content: &str) -> Self {
        self.trailing.push(content.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&format!(
                "resource \"google_securityposture_posture\" \"{}\" {{\n",
                block.label
            ));
            if let Some(ref id) = block.posture_id {
                out.push_str(&format!("  posture_id  = \"{}\"\n", id));
            }
            out.push_str("  parent      = \"organizations/123456789\"\n");
            out.push_str("  state       = \"ACTIVE\"\n");
            for set in &block.policy_sets {
                out.push_str("  policy_sets {\n");
                out.push_str(&format!("    policy_set_id = \"{}\"\n", set.id));
                for policy in &set.policies {
                    out.push_str("    policies {\n");
                    out.push_str(&format!("      policy_id = \"{}\"\n", policy));
                    out.push_str("    }\n");
                }
                out.push_str("  }\n");
            }
            out.push_str("}\n");
        }
        for raw in &self.trailing {
            out.push_str(raw);
            if !raw.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}
