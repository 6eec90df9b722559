use serde::{Deserialize, Serialize};

/// 集群节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub status: NodeStatus,
    /// CPU使用率，0-100
    pub cpu_usage: i32,
    /// 内存使用率，0-100
    pub memory_usage: i32,
    pub is_master: bool,
}

/// 节点状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    Ready,
    NotReady,
    Unknown,
}

text_enum!(NodeStatus {
    Ready => "Ready",
    NotReady => "NotReady",
    Unknown => "Unknown",
});

/// 待创建的节点
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    pub name: String,
    pub region: String,
    pub status: NodeStatus,
    pub cpu_usage: i32,
    pub memory_usage: i32,
    pub is_master: bool,
}

impl NewNode {
    /// 创建工作节点
    pub fn worker(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            status: NodeStatus::Ready,
            cpu_usage: 0,
            memory_usage: 0,
            is_master: false,
        }
    }

    /// 创建控制平面节点
    pub fn master(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            is_master: true,
            ..Self::worker(name, region)
        }
    }
}

impl Node {
    pub fn from_new(id: i64, new_node: &NewNode) -> Self {
        Self {
            id,
            name: new_node.name.clone(),
            region: new_node.region.clone(),
            status: new_node.status,
            cpu_usage: new_node.cpu_usage.clamp(0, 100),
            memory_usage: new_node.memory_usage.clamp(0, 100),
            is_master: new_node.is_master,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, NodeStatus::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_node_builder() {
        let master = NewNode::master("control-plane-1", "us-east-1a");
        assert!(master.is_master);
        assert_eq!(master.status, NodeStatus::Ready);

        let node = Node::from_new(3, &master);
        assert_eq!(node.id, 3);
        assert!(node.is_ready());
    }

    #[test]
    fn test_usage_is_clamped() {
        let mut new_node = NewNode::worker("worker-pool-1", "us-east-1a");
        new_node.cpu_usage = 140;
        new_node.memory_usage = -3;

        let node = Node::from_new(1, &new_node);
        assert_eq!(node.cpu_usage, 100);
        assert_eq!(node.memory_usage, 0);
    }

    #[test]
    fn test_node_serializes_camel_case() {
        let node = Node::from_new(1, &NewNode::worker("worker-pool-1", "us-east-1a"));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["isMaster"], false);
        assert_eq!(json["cpuUsage"], 0);
        assert_eq!(json["status"], "Ready");
    }
}
